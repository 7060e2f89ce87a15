//
//  bitbucket-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output for scripting.

use std::io::{self, Write};

use serde::Serialize;

/// Pretty-prints a value to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Pretty-prints a value to any writer, followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// One compact JSON document per line.
pub fn write_json_lines_to<W: Write, T: Serialize>(
    writer: &mut W,
    values: &[T],
) -> anyhow::Result<()> {
    for value in values {
        serde_json::to_writer(&mut *writer, value)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to_is_pretty() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"name": "test"})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"name\": \"test\"\n}\n");
    }

    #[test]
    fn test_json_lines() {
        let mut out = Vec::new();
        write_json_lines_to(&mut out, &[json!({"a": 1}), json!({"a": 2})]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n{\"a\":2}\n");
    }
}
