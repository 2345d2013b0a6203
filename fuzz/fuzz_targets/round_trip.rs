#![no_main]
use libfuzzer_sys::fuzz_target;

use dualnbt::{from_bytes, to_bytes, Compound, Document, Mode};

fuzz_target!(|root: Compound| {
    let doc = Document::from(root);

    for mode in [Mode::Disk, Mode::Network] {
        let bs = match to_bytes(&doc, mode) {
            Ok(bs) => bs,
            // Arbitrary trees can nest past the depth limit.
            Err(_) => return,
        };
        let back = from_bytes(&bs, mode).unwrap();
        assert_eq!(to_bytes(&back, mode).unwrap(), bs);
    }
});
