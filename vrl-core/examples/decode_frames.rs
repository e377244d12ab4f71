//! Пример: разбор потока кадров VRL
//!
//! Демонстрирует:
//! - нарезку байтового потока на кадры по полю frameSize
//! - валидацию каждого кадра декодером
//! - выгрузку метаданных заголовка в JSON

use std::fs;

use byteorder::{BigEndian, ByteOrder};
use vrl_core::{decode_frame, FRAME_SIZE_MASK, MIN_HEADER_BYTES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = "vrl-core/test_frames.vrt";
    let raw = fs::read(input_path)?;

    let mut offset = 0usize;
    let mut frames_ok = 0u32;
    let mut first_header_json: Option<String> = None;

    while offset + MIN_HEADER_BYTES <= raw.len() {
        // Поле frameSize говорит, где кончается текущий кадр
        let word = BigEndian::read_u32(&raw[offset + 4..offset + 8]);
        let frame_bytes = (word & FRAME_SIZE_MASK) as usize * 4;

        let chunk = &raw[offset..(offset + frame_bytes).min(raw.len())];
        match decode_frame(chunk) {
            Ok(frame) => {
                frames_ok += 1;
                if first_header_json.is_none() {
                    first_header_json = Some(serde_json::to_string_pretty(&frame.header)?);
                }
                println!(
                    "Frame {:4}: stream {:#010X}, {} samples, t={}s+{}ps",
                    frame.header.frame_count,
                    frame.header.stream_id,
                    frame.samples().len() / 2,
                    frame.header.time_seconds,
                    frame.header.time_frac_seconds,
                );
            }
            Err(e) => {
                eprintln!("✗ Frame at offset {offset}: {e}");
                break;
            }
        }
        offset += frame_bytes;
    }

    println!("\n✓ Разобрано кадров: {frames_ok}");
    if let Some(json) = first_header_json {
        println!("\nПервый заголовок:\n{json}");
    }

    Ok(())
}
