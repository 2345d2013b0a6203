#![no_main]
use libfuzzer_sys::fuzz_target;

use dualnbt::{from_bytes, to_bytes, Opts};

fuzz_target!(|data: &[u8]| {
    for opts in [Opts::disk(), Opts::network()] {
        let opts = opts.max_seq_len(100);
        if let Ok(doc) = from_bytes(data, opts) {
            // Accepted input is canonical, so it must write back unchanged.
            let bs = to_bytes(&doc, opts).unwrap();
            assert_eq!(bs, data);
        }
    }
});
