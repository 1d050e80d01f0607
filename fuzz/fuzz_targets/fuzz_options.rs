// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for option construction and path parsing

#![no_main]

use alx_core::options::{CreateFile, Mount, PathOptions, SetAttribute};
use alx_core::{AlluxioPath, Mode, Payload};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Construction must either fail cleanly or produce a payload limited to declared keys
    if let Ok(config) = serde_json::from_str::<Payload>(input) {
        if let Ok(options) = CreateFile::from_config(&config) {
            let payload = options.to_payload();
            assert!(payload.len() <= CreateFile::FIELDS.len());
            assert_eq!(payload, options.to_payload());
        }
        if let Ok(options) = SetAttribute::from_config(&config) {
            assert!(options.to_payload().len() <= config.len());
        }
        let _ = Mount::from_config(&config);
    }

    let _ = input.parse::<Mode>();

    if let Ok(path) = AlluxioPath::parse_uri(input) {
        let _ = path.to_uri();
        let _ = path.name();
        let _ = path.parent();
        if let Some(prefix) = input.get(..10) {
            let _ = path.join(prefix);
        }
    }
});
