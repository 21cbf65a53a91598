use heapless::String;

/// AD type: Shortened Local Name.
const AD_SHORT_NAME: u8 = 0x08;
/// AD type: Complete Local Name.
const AD_COMPLETE_NAME: u8 = 0x09;

/// Extract the complete/shortened local name from advertisement data.
///
/// Returns `None` when the payload carries no name.  Names longer than
/// the 32-byte capacity are truncated.
pub fn extract_device_name(data: &[u8]) -> Option<String<32>> {
    let mut i = 0;
    while i < data.len() {
        let len = data[i] as usize;
        if len == 0 || i + len >= data.len() {
            break;
        }
        let ad_type = data[i + 1];
        if ad_type == AD_SHORT_NAME || ad_type == AD_COMPLETE_NAME {
            let name_bytes = &data[i + 2..i + 1 + len];
            let mut name = String::new();
            for &b in name_bytes {
                if name.push(b as char).is_err() {
                    break;
                }
            }
            return Some(name);
        }
        i += len + 1;
    }
    None
}

/// A peer qualifies when its advertised name contains `filter`.
pub fn name_matches(advertised: &str, filter: &str) -> bool {
    advertised.contains(filter)
}

/// Convenience: parse the name out of `data` and apply [`name_matches`].
pub fn advertisement_matches(data: &[u8], filter: &str) -> bool {
    extract_device_name(data).is_some_and(|name| name_matches(name.as_str(), filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_complete_local_name() {
        let ad_data = [
            0x0E, 0x09, // len=14, type=0x09
            b'E', b'S', b'P', b'3', b'2', b'-', b'C', b'A', b'M', b'-', b'B', b'L', b'E',
        ];
        let name = extract_device_name(&ad_data).unwrap();
        assert_eq!(name.as_str(), "ESP32-CAM-BLE");
    }

    #[test]
    fn extract_shortened_local_name_after_flags() {
        let ad_data = [
            0x02, 0x01, 0x06, // Flags
            0x05, 0x08, b'C', b'A', b'M', b'1', // Shortened name
        ];
        let name = extract_device_name(&ad_data).unwrap();
        assert_eq!(name.as_str(), "CAM1");
    }

    #[test]
    fn no_name_in_advertisement() {
        let ad_data = [0x02, 0x01, 0x06];
        assert!(extract_device_name(&ad_data).is_none());
        assert!(extract_device_name(&[]).is_none());
    }

    #[test]
    fn malformed_length_stops_parsing() {
        assert!(extract_device_name(&[0x00]).is_none());
        assert!(extract_device_name(&[0x09, 0x09, b'A']).is_none());
    }

    #[test]
    fn substring_match_rule() {
        assert!(name_matches("ESP32-CAM-BLE", "ESP32-CAM-BLE"));
        assert!(name_matches("Lab ESP32-CAM-BLE #2", "ESP32-CAM-BLE"));
        assert!(!name_matches("ESP32-CAM", "ESP32-CAM-BLE"));
        assert!(!name_matches("esp32-cam-ble", "ESP32-CAM-BLE"));
    }

    #[test]
    fn unnamed_advertisement_never_matches() {
        assert!(!advertisement_matches(&[0x02, 0x01, 0x06], ""));
        let named = [0x04, 0x09, b'C', b'A', b'M'];
        assert!(advertisement_matches(&named, "CA"));
    }
}
