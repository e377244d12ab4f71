//! Разбор и валидация принятого кадра VRL.

use byteorder::{BigEndian, ByteOrder};
use vrl_types::{ClassId, FrameHeader, VitaError, VitaResult};

use crate::format::{
    unpack_flags, HeaderLayout, FRAME_COUNT_MASK, FRAME_COUNT_SHIFT, FRAME_END, FRAME_SIZE_MASK,
    FRAME_START, MIN_HEADER_BYTES, OFF_CLASS_ID, OFF_FLAGS, OFF_FRAME_SIZE, OFF_FRAME_START,
    OFF_PACKET_SIZE, OFF_STREAM_ID, PAYLOAD_BYTES, SAMPLES_PER_FRAME, TRAILER_BYTES,
};

/// Результат разбора одного кадра.
///
/// `payload` — заимствованный срез входного буфера (ровно
/// [`PAYLOAD_BYTES`] байт), копий декодер не делает. Время жизни среза
/// привязано к буферу: держать `DecodedFrame` дольше буфера не даст
/// компилятор.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    /// Метаданные заголовка в том виде, как их задавал отправитель
    pub header: FrameHeader,
    /// Прочитанное поле frameSize (в 32-битных словах)
    pub frame_size_words: u32,
    /// Прочитанное поле packetSize (в 32-битных словах)
    pub packet_size_words: u16,
    /// Сырой payload: 1024 пары I/Q, i16 big-endian
    pub payload: &'a [u8],
}

impl DecodedFrame<'_> {
    /// Форма заголовка этого кадра.
    pub fn layout(&self) -> HeaderLayout {
        HeaderLayout::for_header(&self.header)
    }

    /// Декодирует payload в вектор i16 (чередование I, Q).
    ///
    /// Единственное место, где декодер копирует данные; вызывается по
    /// желанию.
    pub fn samples(&self) -> Vec<i16> {
        let mut out = vec![0i16; 2 * SAMPLES_PER_FRAME];
        BigEndian::read_i16_into(self.payload, &mut out);
        out
    }
}

/// Разбирает и валидирует кадр из принятого буфера.
///
/// Проверки идут строго по раскладке и обрываются на первой неудаче;
/// буфер, признанный испорченным, дальше не разбирается. Вход не
/// изменяется, результат — одна структура на вызов.
///
/// Порядок отказов: [`VitaError::Truncated`] (короткий заголовок или
/// обрезанный payload), [`VitaError::BadSync`], [`VitaError::SizeMismatch`]
/// (поле frameSize против фактической длины), [`VitaError::BadTrailer`].
/// Резервные биты флагов не проверяются.
pub fn decode_frame(buf: &[u8]) -> VitaResult<DecodedFrame<'_>> {
    // Шаг 1: минимальный заголовок (форма без Class ID)
    if buf.len() < MIN_HEADER_BYTES {
        return Err(VitaError::Truncated {
            needed: MIN_HEADER_BYTES,
            got: buf.len(),
        });
    }

    // Шаг 2: сентинель начала кадра
    let sync = BigEndian::read_u32(&buf[OFF_FRAME_START..OFF_FRAME_START + 4]);
    if sync != FRAME_START {
        return Err(VitaError::BadSync { found: sync });
    }

    // Шаг 3: размерные поля, флаги, stream id
    let size_word = BigEndian::read_u32(&buf[OFF_FRAME_SIZE..OFF_FRAME_SIZE + 4]);
    let frame_size_words = size_word & FRAME_SIZE_MASK;
    let frame_count = ((size_word >> FRAME_COUNT_SHIFT) & FRAME_COUNT_MASK) as u16;

    let packet_size_words = BigEndian::read_u16(&buf[OFF_PACKET_SIZE..OFF_PACKET_SIZE + 2]);
    let flags = unpack_flags(BigEndian::read_u16(&buf[OFF_FLAGS..OFF_FLAGS + 2]));
    let stream_id = BigEndian::read_u32(&buf[OFF_STREAM_ID..OFF_STREAM_ID + 4]);

    // Шаг 4: ветвление по C — до чтения чего-либо после streamId
    let layout = HeaderLayout::from_class_flag(flags.class_id_present);
    let class_id = if flags.class_id_present {
        if buf.len() < layout.header_bytes() {
            return Err(VitaError::Truncated {
                needed: layout.header_bytes(),
                got: buf.len(),
            });
        }
        let oui = BigEndian::read_u32(&buf[OFF_CLASS_ID..OFF_CLASS_ID + 4]);
        let word2 = BigEndian::read_u32(&buf[OFF_CLASS_ID + 4..OFF_CLASS_ID + 8]);
        Some(ClassId::from_words(oui, word2))
    } else {
        None
    };

    // Шаг 5: метки времени по смещениям формы
    let ts = layout.time_seconds_offset();
    let time_seconds = BigEndian::read_u32(&buf[ts..ts + 4]);
    let frac_msw = BigEndian::read_u32(&buf[ts + 4..ts + 8]);
    let frac_lsw = BigEndian::read_u32(&buf[ts + 8..ts + 12]);
    let time_frac_seconds = ((frac_msw as u64) << 32) | frac_lsw as u64;

    // Шаг 6: перекрёстная проверка заявленного размера — главная защита
    // от частичного приёма и порченого поля длины
    let declared = frame_size_words as usize * 4;
    if declared != buf.len() {
        return Err(VitaError::SizeMismatch {
            expected: declared,
            actual: buf.len(),
        });
    }

    // Шаг 7: payload фиксированной длины сразу за заголовком
    let payload_off = layout.payload_offset();
    let needed = payload_off
        + PAYLOAD_BYTES
        + if flags.trailer_present { TRAILER_BYTES } else { 0 };
    if buf.len() < needed {
        return Err(VitaError::Truncated {
            needed,
            got: buf.len(),
        });
    }
    let payload = &buf[payload_off..payload_off + PAYLOAD_BYTES];

    // Шаг 8: трейлер читается и проверяется только при T=1
    if flags.trailer_present {
        let end = BigEndian::read_u32(&buf[payload_off + PAYLOAD_BYTES..][..TRAILER_BYTES]);
        if end != FRAME_END {
            return Err(VitaError::BadTrailer { found: end });
        }
    }

    Ok(DecodedFrame {
        header: FrameHeader {
            frame_count,
            packet_count: flags.packet_count,
            packet_type: flags.packet_type,
            tsi: flags.tsi,
            tsf: flags.tsf,
            trailer_present: flags.trailer_present,
            class_id,
            stream_id,
            time_seconds,
            time_frac_seconds,
        },
        frame_size_words,
        packet_size_words,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use vrl_types::{ClassId, PacketType, Tsf, Tsi};

    use super::*;
    use crate::encode::encode_frame;

    fn sawtooth_samples() -> Vec<i16> {
        (0..2 * SAMPLES_PER_FRAME as i32)
            .map(|i| ((i % 256) - 128) as i16)
            .collect()
    }

    fn full_header() -> FrameHeader {
        let mut h = FrameHeader::new(0xDEAD_BEEF);
        h.frame_count = 0x0ABC;
        h.packet_count = 5;
        h.tsi = Tsi::Utc;
        h.tsf = Tsf::RealTime;
        h.time_seconds = 1_700_000_123;
        h.time_frac_seconds = 500_000_000_000;
        h
    }

    #[test]
    fn test_round_trip_bare() {
        let header = full_header();
        let samples = sawtooth_samples();
        let buf = encode_frame(&header, &samples).unwrap();

        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.header, header);
        assert_eq!(frame.frame_size_words, 1032);
        assert_eq!(frame.packet_size_words, 1029);
        assert_eq!(frame.samples(), samples);
    }

    #[test]
    fn test_round_trip_with_class_id() {
        let mut header = full_header();
        header.class_id = Some(ClassId {
            oui: 0x0012_A2FF,
            information_class: 0x0001,
            packet_class: 0x0002,
        });
        let samples = sawtooth_samples();
        let buf = encode_frame(&header, &samples).unwrap();

        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.header, header);
        assert_eq!(frame.frame_size_words, 1034);
        assert_eq!(frame.packet_size_words, 1031);
        assert_eq!(frame.payload.len(), PAYLOAD_BYTES);
    }

    #[test]
    fn test_bad_sync_rejected_first() {
        let header = full_header();
        let mut buf = encode_frame(&header, &sawtooth_samples()).unwrap();
        buf[0] = b'X';

        match decode_frame(&buf) {
            Err(VitaError::BadSync { found }) => {
                assert_eq!(found, 0x5852_4C50);
            }
            other => panic!("expected BadSync, got {other:?}"),
        }
    }

    #[test]
    fn test_short_buffer_truncated() {
        for len in [0usize, 4, 27] {
            let buf = vec![0u8; len];
            assert!(matches!(
                decode_frame(&buf),
                Err(VitaError::Truncated { needed: 28, .. })
            ));
        }
    }

    #[test]
    fn test_header_only_prefix_rejected() {
        let header = full_header();
        let buf = encode_frame(&header, &sawtooth_samples()).unwrap();

        // Префикс ровно в минимальный заголовок: sync валиден, но размер
        // не сходится
        assert!(matches!(
            decode_frame(&buf[..28]),
            Err(VitaError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_size_field_mutation_detected() {
        let header = full_header();
        let good = encode_frame(&header, &sawtooth_samples()).unwrap();

        for delta in [-2i32, -1, 1, 2, 100] {
            let mut buf = good.clone();
            let word = BigEndian::read_u32(&buf[4..8]);
            let size = (word & FRAME_SIZE_MASK) as i32 + delta;
            let patched = (word & !FRAME_SIZE_MASK) | (size as u32 & FRAME_SIZE_MASK);
            BigEndian::write_u32(&mut buf[4..8], patched);

            assert!(
                matches!(decode_frame(&buf), Err(VitaError::SizeMismatch { .. })),
                "frameSize{delta:+} должен дать SizeMismatch"
            );
        }
    }

    #[test]
    fn test_consistent_but_short_frame_truncated() {
        // frameSize честно описывает буфер из заголовка и 25 слов
        // «payload» — но payload фиксированный, значит кадр обрезан
        let header = full_header();
        let mut buf = encode_frame(&header, &sawtooth_samples()).unwrap();
        buf.truncate(28 + 100);
        let words = buf.len() as u32 / 4;
        let word = BigEndian::read_u32(&buf[4..8]);
        BigEndian::write_u32(&mut buf[4..8], (word & !FRAME_SIZE_MASK) | words);

        assert!(matches!(
            decode_frame(&buf),
            Err(VitaError::Truncated { .. })
        ));
    }

    #[test]
    fn test_trailer_checked_only_when_flagged() {
        // T=1, порченый трейлер → BadTrailer
        let header = full_header();
        let mut buf = encode_frame(&header, &sawtooth_samples()).unwrap();
        let last = buf.len() - 4;
        buf[last..].copy_from_slice(b"XEND");
        match decode_frame(&buf) {
            Err(VitaError::BadTrailer { found }) => assert_eq!(found, 0x5845_4E44),
            other => panic!("expected BadTrailer, got {other:?}"),
        }

        // T=0 — хвост кадра не проверяется вовсе
        let mut no_trailer = full_header();
        no_trailer.trailer_present = false;
        let buf = encode_frame(&no_trailer, &sawtooth_samples()).unwrap();
        let frame = decode_frame(&buf).unwrap();
        assert!(!frame.header.trailer_present);
    }

    #[test]
    fn test_truncated_class_id_block() {
        // Заголовок заявляет C=1, но буфер кончается на 32 байтах
        let mut header = full_header();
        header.class_id = Some(ClassId {
            oui: 1,
            information_class: 2,
            packet_class: 3,
        });
        let buf = encode_frame(&header, &sawtooth_samples()).unwrap();

        assert!(matches!(
            decode_frame(&buf[..32]),
            Err(VitaError::Truncated { needed: 36, .. })
        ));
    }

    #[test]
    fn test_class_id_shift_keeps_timestamps() {
        // Два кадра, различающиеся только C: метки времени обязаны
        // декодироваться в одни и те же значения
        let bare = full_header();
        let mut with_class = full_header();
        with_class.class_id = Some(ClassId {
            oui: 0x00AA_BBCC,
            information_class: 7,
            packet_class: 8,
        });

        let samples = sawtooth_samples();
        let f1 = encode_frame(&bare, &samples).unwrap();
        let f2 = encode_frame(&with_class, &samples).unwrap();

        let d1 = decode_frame(&f1).unwrap();
        let d2 = decode_frame(&f2).unwrap();
        assert_eq!(d1.header.time_seconds, d2.header.time_seconds);
        assert_eq!(d1.header.time_frac_seconds, d2.header.time_frac_seconds);
        assert_eq!(d1.layout(), HeaderLayout::Bare);
        assert_eq!(d2.layout(), HeaderLayout::WithClassId);
    }

    #[test]
    fn test_reserved_flag_bits_tolerated() {
        let header = full_header();
        let mut buf = encode_frame(&header, &sawtooth_samples()).unwrap();
        let flags = BigEndian::read_u16(&buf[10..12]);
        BigEndian::write_u16(&mut buf[10..12], flags | (0x3 << 8));

        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.header, header, "RSVD нигде не должен отражаться");
    }

    #[test]
    fn test_reserved_packet_type_survives() {
        let mut header = full_header();
        header.packet_type = PacketType::Reserved(0x0E);
        let buf = encode_frame(&header, &sawtooth_samples()).unwrap();

        let frame = decode_frame(&buf).unwrap();
        assert_eq!(frame.header.packet_type, PacketType::Reserved(0x0E));

        // И обратно в те же биты
        let again = encode_frame(&frame.header, &frame.samples()).unwrap();
        assert_eq!(buf, again);
    }

    #[test]
    fn test_payload_is_borrowed_view() {
        let header = full_header();
        let buf = encode_frame(&header, &sawtooth_samples()).unwrap();
        let frame = decode_frame(&buf).unwrap();

        // Срез указывает внутрь исходного буфера
        let base = buf.as_ptr() as usize;
        let view = frame.payload.as_ptr() as usize;
        assert_eq!(view - base, 28);
    }
}
