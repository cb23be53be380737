use byteorder::{ByteOrder, LittleEndian};

pub(crate) fn to_u16(bytes: &[u8]) -> u16 {
    LittleEndian::read_u16(bytes)
}

pub(crate) fn millimeters_to_meters(raw: u16) -> f32 {
    (f64::from(raw) / 1000.) as f32
}

pub(crate) fn to_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02X}", e))
        .collect::<Vec<_>>()
        .join(" ")
}
