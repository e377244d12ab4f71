//! Спецификация байтовой раскладки кадра VRL/VITA 49
//!
//! Единственный источник истины о формате: сентинели, смещения, маски и
//! сдвиги битовых полей, счёт размеров в 32-битных словах. Все
//! многобайтовые поля на проводе хранятся в порядке big-endian (сетевая
//! последовательность).
//!
//! Кадр:
//!
//! ```text
//! [0..4]    "VRLP"                           стартовое слово
//! [4..8]    frameCount:frameSize             12+20 бит
//! [8..10]   packetSize                       u16, в 32-битных словах
//! [10..12]  packetType:C:T:RSVD:TSI:TSF:packetCount   4+1+1+2+2+2+4 бит
//! [12..16]  streamId                         u32
//! [16..24]  classId1 (OUI), classId2 (ICC:PCC)  только при C=1
//! [16/24..] timeSeconds, timeFracSecMSB, timeFracSecLSB
//! [..]      payload: 1024 пары I/Q, i16 big-endian
//! [..]      "VEND"                           только при T=1
//! ```

use vrl_types::{FrameHeader, PacketType, Tsf, Tsi};

/// Стартовое слово кадра: b"VRLP"
pub const FRAME_START: u32 = 0x5652_4C50;

/// Завершающее слово кадра: b"VEND"
pub const FRAME_END: u32 = 0x5645_4E44;

/// Количество пар I/Q в payload одного кадра.
///
/// Константа развёртывания: кодек переменную длину payload не
/// поддерживает.
pub const SAMPLES_PER_FRAME: usize = 1024;

/// Размер payload в байтах: пары i16 I и Q
pub const PAYLOAD_BYTES: usize = SAMPLES_PER_FRAME * 2 * 2;

/// Размер payload в 32-битных словах
pub const PAYLOAD_WORDS: usize = PAYLOAD_BYTES / 4;

/// Размер трейлера в байтах (одно слово "VEND")
pub const TRAILER_BYTES: usize = 4;

/// Минимальный размер заголовка — форма без Class ID
pub const MIN_HEADER_BYTES: usize = 28;

// ---------------------------------------------------------------------------
// Смещения полей от начала кадра
// ---------------------------------------------------------------------------

pub const OFF_FRAME_START: usize = 0;
pub const OFF_FRAME_SIZE: usize = 4;
pub const OFF_PACKET_SIZE: usize = 8;
pub const OFF_FLAGS: usize = 10;
pub const OFF_STREAM_ID: usize = 12;
/// Первое слово Class ID; валидно только при C=1
pub const OFF_CLASS_ID: usize = 16;

// ---------------------------------------------------------------------------
// Слово frameSize:frameCount (смещение 4)
//
// Биты 19–0 — frameSize (20 бит), биты 31–20 — frameCount (12 бит).
// ---------------------------------------------------------------------------

pub const FRAME_SIZE_MASK: u32 = 0x000F_FFFF;
pub const FRAME_COUNT_MASK: u32 = 0x0FFF;
pub const FRAME_COUNT_SHIFT: u32 = 20;

/// Период счётчика кадров (12 бит)
pub const FRAME_COUNT_MODULO: u32 = 4096;

/// Период счётчика пакетов (4 бита)
pub const PACKET_COUNT_MODULO: u16 = 16;

// ---------------------------------------------------------------------------
// Полуслово флагов (смещение 10)
//
// Биты 3–0 — packetCount, 5–4 — TSF, 7–6 — TSI, 9–8 — RSVD (пишутся
// нулями, при чтении игнорируются), 10 — T, 11 — C, 15–12 — packetType.
// Упаковка всегда ручными масками и сдвигами: битовые поля структур
// непереносимы между целевыми платформами.
// ---------------------------------------------------------------------------

pub const PACKET_COUNT_BITS: u16 = 0x000F;
pub const TSF_SHIFT: u16 = 4;
pub const TSI_SHIFT: u16 = 6;
pub const TWO_BIT_MASK: u16 = 0x0003;
pub const TRAILER_BIT: u16 = 1 << 10;
pub const CLASS_ID_BIT: u16 = 1 << 11;
pub const PACKET_TYPE_SHIFT: u16 = 12;
pub const PACKET_TYPE_BITS: u16 = 0x000F;

/// Одна из двух форм заголовка.
///
/// Формы описаны явно, а не одной раскладкой с «возможными» полями: вся
/// арифметика смещений после streamId выводится из формы, и обе формы —
/// полноправные (см. тест-векторы).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// Заголовок без блока Class ID (28 байт, 7 слов)
    Bare,
    /// Заголовок с блоком Class ID (36 байт, 9 слов)
    WithClassId,
}

/// Распакованное полуслово флагов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagFields {
    pub packet_count: u8,
    pub tsf: Tsf,
    pub tsi: Tsi,
    pub trailer_present: bool,
    pub class_id_present: bool,
    pub packet_type: PacketType,
}

impl HeaderLayout {
    /// Форма, соответствующая метаданным заголовка.
    pub fn for_header(header: &FrameHeader) -> Self {
        if header.has_class_id() {
            HeaderLayout::WithClassId
        } else {
            HeaderLayout::Bare
        }
    }

    /// Форма по прочитанному флагу C.
    pub fn from_class_flag(class_id_present: bool) -> Self {
        if class_id_present {
            HeaderLayout::WithClassId
        } else {
            HeaderLayout::Bare
        }
    }

    /// Длина заголовка в байтах.
    pub fn header_bytes(self) -> usize {
        match self {
            HeaderLayout::Bare => 28,
            HeaderLayout::WithClassId => 36,
        }
    }

    /// Смещение поля timeSeconds: сдвигается на 8 байт при Class ID.
    pub fn time_seconds_offset(self) -> usize {
        self.header_bytes() - 12
    }

    /// Смещение начала payload (конец заголовка).
    pub fn payload_offset(self) -> usize {
        self.header_bytes()
    }

    /// Размер VITA-пакета в словах: от слова заголовка пакета
    /// (смещение 8) до конца payload. Два слова VRL и трейлер —
    /// обрамление кадра, в пакет не входят.
    pub fn packet_words(self) -> usize {
        (self.header_bytes() - OFF_PACKET_SIZE) / 4 + PAYLOAD_WORDS
    }

    /// Полный размер кадра в словах, от "VRLP" до трейлера включительно.
    pub fn frame_words(self, trailer_present: bool) -> usize {
        self.header_bytes() / 4 + PAYLOAD_WORDS + usize::from(trailer_present)
    }

    /// Полный размер кадра в байтах.
    pub fn frame_bytes(self, trailer_present: bool) -> usize {
        self.frame_words(trailer_present) * 4
    }
}

/// Упаковывает полуслово флагов из метаданных заголовка.
///
/// Резервные биты 9–8 всегда нули.
pub fn pack_flags(header: &FrameHeader) -> u16 {
    let mut w = header.packet_count as u16 & PACKET_COUNT_BITS;
    w |= (header.tsf.bits() as u16) << TSF_SHIFT;
    w |= (header.tsi.bits() as u16) << TSI_SHIFT;
    if header.trailer_present {
        w |= TRAILER_BIT;
    }
    if header.has_class_id() {
        w |= CLASS_ID_BIT;
    }
    w |= (header.packet_type.bits() as u16) << PACKET_TYPE_SHIFT;
    w
}

/// Распаковывает полуслово флагов.
///
/// Резервные биты не проверяются (единственное поле, освобождённое от
/// валидации).
pub fn unpack_flags(w: u16) -> FlagFields {
    FlagFields {
        packet_count: (w & PACKET_COUNT_BITS) as u8,
        tsf: Tsf::from_bits(((w >> TSF_SHIFT) & TWO_BIT_MASK) as u8),
        tsi: Tsi::from_bits(((w >> TSI_SHIFT) & TWO_BIT_MASK) as u8),
        trailer_present: w & TRAILER_BIT != 0,
        class_id_present: w & CLASS_ID_BIT != 0,
        packet_type: PacketType::from_bits(((w >> PACKET_TYPE_SHIFT) & PACKET_TYPE_BITS) as u8),
    }
}
