#![no_main]

use libfuzzer_sys::fuzz_target;

use alcove::resources::resources_from_xml;

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let xml = String::from_utf8_lossy(data);

    // The decoder should never panic regardless of input
    let _ = resources_from_xml(&xml);
});
