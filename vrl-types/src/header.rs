use serde::{Deserialize, Serialize};

use crate::{PacketType, Tsf, Tsi};

/// Class ID: два 32-битных слова заголовка, присутствуют при C=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassId {
    /// Organizationally Unique Identifier (слово 1)
    pub oui: u32,
    /// Information Class Code — старшие 16 бит слова 2
    pub information_class: u16,
    /// Packet Class Code — младшие 16 бит слова 2
    pub packet_class: u16,
}

/// Метаданные заголовка одного кадра VRL.
///
/// Содержит только то, что задаёт отправитель: размерные поля
/// (frameSize/packetSize) сюда не входят — их считает энкодер, а декодер
/// возвращает отдельно в `DecodedFrame`. Флаг C выводится из
/// `class_id.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    /// Счётчик кадров, 12 бит на проводе (по модулю 4096)
    pub frame_count: u16,
    /// Счётчик пакетов, 4 бита на проводе (по модулю 16)
    pub packet_count: u8,
    /// Тип пакета VITA 49
    pub packet_type: PacketType,
    /// Формат целочисленной метки времени
    pub tsi: Tsi,
    /// Формат дробной метки времени
    pub tsf: Tsf,
    /// Признак трейлера (T): кадр завершается словом "VEND"
    pub trailer_present: bool,
    /// Блок Class ID; `Some` ⇔ C=1 и заголовок на 8 байт длиннее
    pub class_id: Option<ClassId>,
    /// Идентификатор логического потока; кодеку непрозрачен
    pub stream_id: u32,
    /// Целочисленная метка времени, семантика по `tsi`
    pub time_seconds: u32,
    /// Дробная метка времени (на проводе — MSW/LSW), семантика по `tsf`
    pub time_frac_seconds: u64,
}

impl FrameHeader {
    /// Заголовок профиля NDR: IF data + Stream ID, UTC/пикосекунды,
    /// трейлер включён, Class ID отсутствует.
    pub fn new(stream_id: u32) -> Self {
        FrameHeader {
            frame_count: 0,
            packet_count: 0,
            packet_type: PacketType::IfDataWithStreamId,
            tsi: Tsi::Utc,
            tsf: Tsf::RealTime,
            trailer_present: true,
            class_id: None,
            stream_id,
            time_seconds: 0,
            time_frac_seconds: 0,
        }
    }

    /// Признак C: присутствует ли в заголовке блок Class ID.
    pub fn has_class_id(&self) -> bool {
        self.class_id.is_some()
    }
}

impl ClassId {
    /// Собирает второе слово Class ID (ICC в старших 16 битах, PCC в младших).
    pub fn word2(&self) -> u32 {
        ((self.information_class as u32) << 16) | self.packet_class as u32
    }

    /// Разбирает второе слово Class ID.
    pub fn from_words(oui: u32, word2: u32) -> Self {
        ClassId {
            oui,
            information_class: (word2 >> 16) as u16,
            packet_class: word2 as u16,
        }
    }
}
