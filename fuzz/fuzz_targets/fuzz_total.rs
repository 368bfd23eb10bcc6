#![no_main]
use libfuzzer_sys::fuzz_target;
use xlsread::{CompoundFile, OpenOptions};

fuzz_target!(|data: &[u8]| {
    let comp = match CompoundFile::open(data.to_vec()) {
        Ok(comp) => comp,
        Err(_) => return,
    };
    let _streams = comp
        .entries()
        .filter(|e| e.is_stream())
        .map(|e| comp.read_stream(e.index()))
        .collect::<Vec<_>>();

    let _book = OpenOptions::new().open_bytes(data.to_vec());
});
