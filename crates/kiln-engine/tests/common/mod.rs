//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use kiln_engine::NativeLibrary;
use kiln_sdk::{unbox_integer, AbiResult, NativeContext, NativeError, NativeValue};

/// Library that records every dispatch and echoes the index back.
///
/// Index 7 always fails with an argument error; index 8 panics; index 9
/// divides its first two integer arguments.
pub struct RecordingLibrary {
    soname: String,
    calls: CallLog,
}

/// Handle onto the dispatches a [`RecordingLibrary`] has seen
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(u32, Vec<NativeValue>)>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<(u32, Vec<NativeValue>)> {
        self.0.lock().clone()
    }

    pub fn last(&self) -> Option<(u32, Vec<NativeValue>)> {
        self.0.lock().last().cloned()
    }
}

impl RecordingLibrary {
    pub fn new(soname: &str) -> (Self, CallLog) {
        let calls = CallLog::default();
        let library = Self {
            soname: soname.to_string(),
            calls: calls.clone(),
        };
        (library, calls)
    }
}

impl NativeLibrary for RecordingLibrary {
    fn soname(&self) -> &str {
        &self.soname
    }

    fn invoke(
        &self,
        index: u32,
        _ctx: &dyn NativeContext,
        args: &[NativeValue],
    ) -> AbiResult<NativeValue> {
        self.calls.0.lock().push((index, args.to_vec()));
        match index {
            7 => Err(NativeError::ArgumentError("index 7 always fails".to_string())),
            8 => panic!("index 8 panics"),
            9 => {
                let a = unbox_integer(args.first().unwrap_or(&NativeValue::Null))?;
                let b = unbox_integer(args.get(1).unwrap_or(&NativeValue::Null))?;
                if b == 0 {
                    return Err(NativeError::ArgumentError("division by zero".to_string()));
                }
                Ok(NativeValue::integer(a / b))
            }
            _ => Ok(NativeValue::integer(index as i32)),
        }
    }
}
