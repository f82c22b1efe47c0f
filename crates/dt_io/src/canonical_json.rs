//! Canonical JSON output for die tables.
//! - Objects: keys sorted by UTF-8 byte order
//! - Arrays: order preserved (rows are already in face order)
//! - Output: compact, no trailing newline
//! - File writes (canonical JSON or plain text) go through a temp file in the
//!   target directory, then rename.
//!   If the rename fails (e.g. cross-device) the target is written directly.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::debug;

use crate::{IoError, IoResult};

/// Canonical bytes of `v`.
pub fn to_canonical_json_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(512);
    push_value(v, &mut out);
    out
}

/// Canonical text of `v`.
pub fn to_canonical_json_string(v: &Value) -> String {
    // Only JSON text is ever pushed, which is valid UTF-8.
    String::from_utf8_lossy(&to_canonical_json_bytes(v)).into_owned()
}

/// Write `v` to `path` as canonical JSON, creating parent directories.
pub fn write_canonical_file(path: &Path, v: &Value) -> IoResult<()> {
    write_file_atomic(path, &to_canonical_json_bytes(v))
}

/// Write raw `bytes` to `path` through a sibling temp file.
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    write_atomic(path, bytes).map_err(|source| IoError::Write {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote output file");
    Ok(())
}

fn push_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                push_value(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push(b'{');
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                push_string(k, out);
                out.push(b':');
                push_value(&map[k.as_str()], out);
            }
            out.push(b'}');
        }
        Value::String(s) => push_string(s, out),
        // Scalars have a single compact form.
        scalar => out.extend_from_slice(scalar.to_string().as_bytes()),
    }
}

fn push_string(s: &str, out: &mut Vec<u8>) {
    out.extend_from_slice(Value::from(s).to_string().as_bytes());
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let tmp = tmp_path_for(path, &parent);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if fs::rename(&tmp, path).is_err() {
        let direct = fs::write(path, bytes);
        let _ = fs::remove_file(&tmp);
        direct?;
    }
    Ok(())
}

/// "<file name>.<pid>.<counter>.tmp" next to the target.
fn tmp_path_for(target: &Path, dir: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = target
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("out");
    dir.join(format!("{name}.{}.{n}.tmp", std::process::id()))
}
