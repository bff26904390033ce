#![no_main]

use libfuzzer_sys::fuzz_target;
use shamir_seed::{HexCodec, Share, combine};

// Feeds arbitrary share lists to `combine`.
//
// Shares may carry index 0, duplicate indices, payloads of mixed or unsupported
// widths, or text the codec rejects. Every case must come back as an `Err` or a
// value of the right width, never a panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let num_shares = (data[0] % 12) as usize;
    let mut offset = 1;
    let mut shares = Vec::with_capacity(num_shares);

    for _ in 0..num_shares {
        if offset + 2 > data.len() {
            break;
        }
        let index = data[offset];
        let len = (data[offset + 1] % 40) as usize;
        offset += 2;

        let end = (offset + len).min(data.len());
        let payload = &data[offset..end];
        offset = end;

        // Mostly valid hex, occasionally raw text to exercise codec errors
        let mnemonic = if index % 17 == 0 {
            String::from_utf8_lossy(payload).into_owned()
        } else {
            hex::encode(payload)
        };
        shares.push(Share::new(index, mnemonic));
    }

    if let Ok(secret) = combine(&shares, &HexCodec) {
        let width = shares
            .first()
            .map(|s| s.mnemonic.trim().len())
            .unwrap_or_default();
        assert_eq!(secret.len(), width);
    }

    let _ = combine(&[], &HexCodec);
});
