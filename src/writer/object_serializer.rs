//! PDF object serialization.
//!
//! Writes [`Object`] values in PDF syntax (ISO 32000-1:2008 §7.3).

use crate::object::{Object, ObjectRef};
use std::collections::HashMap;
use std::io::Write;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Minimal whitespace between dictionary entries
    compact: bool,
}

impl ObjectSerializer {
    /// Create a serializer that puts each dictionary entry on its own line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize an object to a string (for debugging and tests).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        let mut buf = Vec::new();
        match self.write_object(&mut buf, obj) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(e) => format!("<unserializable: {}>", e),
        }
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        obj_ref: ObjectRef,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", obj_ref.id, obj_ref.gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write an object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", b),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write_real(w, *r),
            Object::String(s) => write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(items) => {
                write!(w, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    self.write_object(w, item)?;
                }
                write!(w, "]")
            },
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.entry("Length".to_string())
                    .or_insert(Object::Integer(data.len() as i64));
                self.write_dictionary(w, &dict)?;
                write!(w, "\nstream\n")?;
                w.write_all(data)?;
                write!(w, "\nendstream")
            },
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;

        // Sorted keys keep the output byte-for-byte reproducible
        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for key in keys {
            if self.compact {
                write!(w, " ")?;
            } else {
                write!(w, "\n  ")?;
            }
            write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, &dict[key])?;
        }

        if self.compact {
            write!(w, " >>")
        } else {
            if !dict.is_empty() {
                writeln!(w)?;
            }
            write!(w, ">>")
        }
    }
}

/// Write a real number with at most five decimals and no trailing zeros.
fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 {
        write!(w, "{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        write!(w, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Write a literal string, or a hex string when the bytes are not printable ASCII.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let printable = data.iter().all(|b| (0x20..=0x7E).contains(b));
    if !printable {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        return write!(w, ">");
    }

    write!(w, "(")?;
    for &byte in data {
        match byte {
            b'(' | b')' | b'\\' => w.write_all(&[b'\\', byte])?,
            _ => w.write_all(&[byte])?,
        }
    }
    write!(w, ")")
}

/// Write a name, escaping delimiters and non-regular characters as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        let regular = byte.is_ascii_graphic()
            && !matches!(byte, b'#' | b'/' | b'%' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}');
        if regular {
            w.write_all(&[byte])?;
        } else {
            write!(w, "#{:02X}", byte)?;
        }
    }
    Ok(())
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from a Rust string.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create a Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Create a Reference object.
    pub fn reference(obj_ref: ObjectRef) -> Object {
        Object::Reference(obj_ref)
    }

    /// Create a rectangle array `[llx lly urx ury]` from origin and size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}
