//! Integration tests for symbol manifest loading
//!
//! Tests index assignment across passes, duplicate handling, and partial
//! state after I/O failures.

mod common;

use std::io::{self, BufReader, Cursor, Read};

use common::RecordingLibrary;
use kiln_engine::vm::symbols::{load, load_str};
use kiln_engine::{LoadError, LoadedLibrary};
use kiln_sdk::{NativeValue, NullContext};

/// Yields its data, then fails every read.
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            Err(io::Error::new(io::ErrorKind::Other, "device went away"))
        } else {
            Ok(n)
        }
    }
}

#[test]
fn test_manifest_indices_and_dispatch() {
    let (lib, log) = RecordingLibrary::new("test.fs");
    let lib = LoadedLibrary::new(lib);
    load_str(&lib, "open\nclose\nread\n").unwrap();

    assert_eq!(lib.index_of("open"), Some(0));
    assert_eq!(lib.index_of("close"), Some(1));
    assert_eq!(lib.index_of("read"), Some(2));

    let close = lib.get_function("close").unwrap();
    let result = close.invoke(&NullContext, &[NativeValue::integer(3)]).unwrap();

    assert_eq!(result, NativeValue::integer(1));
    assert_eq!(log.calls(), vec![(1, vec![NativeValue::integer(3)])]);
}

#[test]
fn test_second_pass_continues_index_sequence() {
    let (lib, _log) = RecordingLibrary::new("test.multi");
    let lib = LoadedLibrary::new(lib);

    assert_eq!(load_str(&lib, "a\nb\n").unwrap(), 2);
    assert_eq!(load_str(&lib, "c\n").unwrap(), 1);

    assert_eq!(lib.index_of("a"), Some(0));
    assert_eq!(lib.index_of("b"), Some(1));
    assert_eq!(lib.index_of("c"), Some(2));
    assert!(lib.unreachable_indices().is_empty());
}

#[test]
fn test_duplicate_across_passes_last_wins() {
    let (lib, log) = RecordingLibrary::new("test.dup");
    let lib = LoadedLibrary::new(lib);

    load_str(&lib, "a\n").unwrap();
    load_str(&lib, "a\n").unwrap();

    assert_eq!(lib.len(), 1);
    assert_eq!(lib.index_of("a"), Some(1));
    assert_eq!(lib.unreachable_indices(), vec![0]);

    lib.get_function("a").unwrap().invoke(&NullContext, &[]).unwrap();
    assert_eq!(log.last().unwrap().0, 1);
}

#[test]
fn test_duplicate_within_manifest_advances_counter() {
    let (lib, _log) = RecordingLibrary::new("test.dup");
    let lib = LoadedLibrary::new(lib);

    assert_eq!(load_str(&lib, "a\nb\na\nc\n").unwrap(), 4);

    assert_eq!(lib.index_of("a"), Some(2));
    assert_eq!(lib.index_of("b"), Some(1));
    assert_eq!(lib.index_of("c"), Some(3));
    assert_eq!(lib.unreachable_indices(), vec![0]);

    // Insertion order is preserved for the rebound name.
    let names: Vec<String> = lib.bindings().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_pass_after_internal_duplicate_aliases_index() {
    let (lib, _log) = RecordingLibrary::new("test.alias");
    let lib = LoadedLibrary::new(lib);

    // Three lines, two distinct names: indices 0..3 used, next pass starts at 2.
    load_str(&lib, "x\ny\nx\n").unwrap();
    load_str(&lib, "z\n").unwrap();

    assert_eq!(lib.index_of("x"), Some(2));
    assert_eq!(lib.index_of("z"), Some(2));
    assert_eq!(lib.index_of("y"), Some(1));
}

#[test]
fn test_io_failure_keeps_partial_bindings() {
    let (lib, _log) = RecordingLibrary::new("test.io");
    let lib = LoadedLibrary::new(lib);

    let reader = BufReader::new(FailingReader {
        data: Cursor::new(b"first\nsecond\n".to_vec()),
    });
    let err = load(&lib, reader).unwrap_err();

    match err {
        LoadError::Io { soname, line, .. } => {
            assert_eq!(soname, "test.io");
            assert_eq!(line, 3);
        }
    }
    assert_eq!(lib.index_of("first"), Some(0));
    assert_eq!(lib.index_of("second"), Some(1));

    // A later pass continues after the surviving entries.
    load_str(&lib, "third\n").unwrap();
    assert_eq!(lib.index_of("third"), Some(2));
}

#[test]
fn test_invalid_utf8_is_io_failure() {
    let (lib, _log) = RecordingLibrary::new("test.utf8");
    let lib = LoadedLibrary::new(lib);

    let bytes: &[u8] = b"ok\n\xff\xfe\n";
    let err = load(&lib, bytes).unwrap_err();

    assert!(matches!(err, LoadError::Io { line: 2, .. }));
    assert_eq!(lib.index_of("ok"), Some(0));
    assert_eq!(lib.len(), 1);
}

#[test]
fn test_unregistered_name_is_absent() {
    let (lib, log) = RecordingLibrary::new("test.lookup");
    let lib = LoadedLibrary::new(lib);
    load_str(&lib, "present\n").unwrap();

    assert!(lib.get_function("absent").is_none());
    assert!(log.calls().is_empty());
}
