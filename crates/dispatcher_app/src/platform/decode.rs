use chardetng::EncodingDetector;
use dispatch_logging::dispatch_debug;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImport {
    pub text: String,
    pub encoding_label: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("file is not valid {encoding} text")]
    Malformed { encoding: &'static str },
}

/// Decode an import file: BOM first, then a chardetng guess. Spreadsheet
/// exports are frequently windows-1252 rather than UTF-8.
pub fn decode_import(bytes: &[u8]) -> Result<DecodedImport, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedImport, DecodeError> {
    // `decode` strips a matching BOM.
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    dispatch_debug!("Import decoded as {}", encoding.name());
    Ok(DecodedImport {
        text: text.into_owned(),
        encoding_label: encoding.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        let decoded = decode_import("name,phone\nJoão,11\n".as_bytes()).expect("decode");
        assert_eq!(decoded.text, "name,phone\nJoão,11\n");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn bom_is_honoured_and_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("name,phone\nAna,1\n".as_bytes());

        let decoded = decode_import(&bytes).expect("decode");

        assert_eq!(decoded.text, "name,phone\nAna,1\n");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn utf16_bom_is_decoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "name,phone\nAna,1\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let decoded = decode_import(&bytes).expect("decode");

        assert_eq!(decoded.text, "name,phone\nAna,1\n");
        assert_eq!(decoded.encoding_label, "UTF-16LE");
    }

    #[test]
    fn latin1_export_is_detected() {
        let bytes = b"nome,telefone\nJo\xe3o,11\nConcei\xe7\xe3o,21\nAnt\xf4nio,31\n";

        let decoded = decode_import(bytes).expect("decode");

        assert_eq!(decoded.encoding_label, "windows-1252");
        assert!(decoded.text.contains("João"));
        assert!(decoded.text.contains("Conceição"));
        assert!(decoded.text.contains("Antônio"));
    }
}
