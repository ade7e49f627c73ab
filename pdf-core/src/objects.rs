/// Object identifier: (object_number, generation_number).
/// Generation is always 0 for new documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(pub u32, pub u16);

/// The PDF object types this crate writes (PDF 32000-1:2008
/// Section 7.3).
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// PDF name object (stored without the leading `/`).
    Name(String),
    /// Text string, written WinAnsi-encoded inside parens.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Key-value pairs. Uses Vec for deterministic output order.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Dictionary with computed keys, e.g. per-page resource
    /// names like `Im1`.
    pub fn dict_owned(entries: Vec<(String, PdfObject)>) -> Self {
        PdfObject::Dictionary(entries)
    }

    pub fn stream(
        dict_entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
    ) -> Self {
        PdfObject::Stream {
            dict: dict_entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_id_equality() {
        assert_eq!(ObjId(7, 0), ObjId(7, 0));
        assert_ne!(ObjId(7, 0), ObjId(8, 0));
    }

    #[test]
    fn dict_keeps_insertion_order() {
        let obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(ObjId(2, 0))),
            ("Contents", PdfObject::Reference(ObjId(9, 0))),
        ]);
        match obj {
            PdfObject::Dictionary(entries) => {
                let keys: Vec<&str> =
                    entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["Type", "Parent", "Contents"]);
            }
            _ => panic!("expected Dictionary"),
        }
    }

    #[test]
    fn dict_owned_accepts_computed_keys() {
        let obj = PdfObject::dict_owned(vec![(
            format!("Im{}", 3),
            PdfObject::Reference(ObjId(12, 0)),
        )]);
        match obj {
            PdfObject::Dictionary(entries) => assert_eq!(entries[0].0, "Im3"),
            _ => panic!("expected Dictionary"),
        }
    }

    #[test]
    fn stream_constructor() {
        let data = b"BT /F2 16 Tf ET".to_vec();
        let obj = PdfObject::stream(
            vec![("Filter", PdfObject::name("FlateDecode"))],
            data.clone(),
        );
        match obj {
            PdfObject::Stream { dict, data: d } => {
                assert_eq!(dict.len(), 1);
                assert_eq!(d, data);
            }
            _ => panic!("expected Stream"),
        }
    }
}
