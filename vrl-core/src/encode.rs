//! Сборка кадра VRL из метаданных заголовка и блока выборок I/Q.

use byteorder::{BigEndian, ByteOrder};
use vrl_types::{FrameHeader, VitaError, VitaResult};

use crate::format::{
    pack_flags, HeaderLayout, FRAME_COUNT_MASK, FRAME_COUNT_SHIFT, FRAME_END, FRAME_SIZE_MASK,
    FRAME_START, OFF_CLASS_ID, OFF_FLAGS, OFF_FRAME_SIZE, OFF_FRAME_START, OFF_PACKET_SIZE,
    OFF_STREAM_ID, PAYLOAD_BYTES, SAMPLES_PER_FRAME, TRAILER_BYTES,
};

/// Кодирует один кадр в непрерывный буфер, готовый к отправке.
///
/// `samples` — ровно `2 * SAMPLES_PER_FRAME` значений i16, чередование
/// I, Q. Иная длина — [`VitaError::SizeMismatch`], единственная ошибка
/// энкодера.
///
/// Размерные поля (frameSize, packetSize) энкодер считает сам из формы
/// заголовка и флага трейлера — вызывающий их не задаёт, поэтому они не
/// могут разойтись с фактическим содержимым. Счётчики усекаются по
/// модулю своей разрядности (4096 и 16): семантика заворота из
/// стандарта, сессионное состояние потока кодеку не принадлежит.
///
/// Длина результата всегда `frameSize * 4` байт.
pub fn encode_frame(header: &FrameHeader, samples: &[i16]) -> VitaResult<Vec<u8>> {
    if samples.len() != 2 * SAMPLES_PER_FRAME {
        return Err(VitaError::SizeMismatch {
            expected: 2 * SAMPLES_PER_FRAME,
            actual: samples.len(),
        });
    }

    let layout = HeaderLayout::for_header(header);
    let total = layout.frame_bytes(header.trailer_present);
    let mut buf = vec![0u8; total];

    BigEndian::write_u32(&mut buf[OFF_FRAME_START..OFF_FRAME_START + 4], FRAME_START);

    let size_word = (layout.frame_words(header.trailer_present) as u32 & FRAME_SIZE_MASK)
        | ((header.frame_count as u32 & FRAME_COUNT_MASK) << FRAME_COUNT_SHIFT);
    BigEndian::write_u32(&mut buf[OFF_FRAME_SIZE..OFF_FRAME_SIZE + 4], size_word);

    BigEndian::write_u16(
        &mut buf[OFF_PACKET_SIZE..OFF_PACKET_SIZE + 2],
        layout.packet_words() as u16,
    );
    BigEndian::write_u16(&mut buf[OFF_FLAGS..OFF_FLAGS + 2], pack_flags(header));
    BigEndian::write_u32(&mut buf[OFF_STREAM_ID..OFF_STREAM_ID + 4], header.stream_id);

    if let Some(class_id) = &header.class_id {
        BigEndian::write_u32(&mut buf[OFF_CLASS_ID..OFF_CLASS_ID + 4], class_id.oui);
        BigEndian::write_u32(&mut buf[OFF_CLASS_ID + 4..OFF_CLASS_ID + 8], class_id.word2());
    }

    let ts = layout.time_seconds_offset();
    BigEndian::write_u32(&mut buf[ts..ts + 4], header.time_seconds);
    BigEndian::write_u32(&mut buf[ts + 4..ts + 8], (header.time_frac_seconds >> 32) as u32);
    BigEndian::write_u32(&mut buf[ts + 8..ts + 12], header.time_frac_seconds as u32);

    let payload = layout.payload_offset();
    BigEndian::write_i16_into(samples, &mut buf[payload..payload + PAYLOAD_BYTES]);

    if header.trailer_present {
        BigEndian::write_u32(&mut buf[total - TRAILER_BYTES..total], FRAME_END);
    }

    Ok(buf)
}
