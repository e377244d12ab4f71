//! Пример: сборка пачки кадров VRL с синтетическими IQ-данными
//!
//! Демонстрирует:
//! - заполнение заголовка профиля NDR
//! - заворот счётчиков кадров/пакетов на стороне вызывающего
//! - запись готовых кадров в файл (имитация того, что уйдёт в UDP)

use std::fs::File;
use std::io::Write;

use vrl_core::{encode_frame, SAMPLES_PER_FRAME};
use vrl_types::FrameHeader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = "vrl-core/test_frames.vrt";

    let mut file = File::create(output_path)?;
    let num_frames = 10u32;
    let sample_rate = 102_400_000.0_f64; // 102.4 Msps

    let mut total_bytes = 0usize;

    for n in 0..num_frames {
        // --- Синтетика: комплексная синусоида 1 МГц ---
        let mut samples = Vec::with_capacity(2 * SAMPLES_PER_FRAME);
        for i in 0..SAMPLES_PER_FRAME {
            let t = (n as usize * SAMPLES_PER_FRAME + i) as f64 / sample_rate;
            let phase = 2.0 * std::f64::consts::PI * 1_000_000.0 * t;
            samples.push((32_000.0 * phase.sin()) as i16); // I
            samples.push((32_000.0 * phase.cos()) as i16); // Q
        }

        // --- Заголовок: счётчики заворачивает отправитель ---
        let mut header = FrameHeader::new(0x0000_1234);
        header.frame_count = (n % 4096) as u16;
        header.packet_count = (n % 16) as u8;
        header.time_seconds = 1_704_067_200;
        // Пикосекунды от начала секунды по номеру выборки
        header.time_frac_seconds =
            ((n as u64 * SAMPLES_PER_FRAME as u64) as f64 / sample_rate * 1e12) as u64;

        let wire = encode_frame(&header, &samples)?;
        total_bytes += wire.len();
        file.write_all(&wire)?;

        println!(
            "Frame {n}: {} bytes, frameCount={}, packetCount={}",
            wire.len(),
            header.frame_count,
            header.packet_count
        );
    }

    println!("\n✓ Записано: {output_path}");
    println!("  Frames : {num_frames}");
    println!("  Bytes  : {total_bytes}");

    Ok(())
}
