use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use shamir_seed::{Config, EvalMode, FieldSize, HexCodec, MnemonicCodec, ShamirSeed, Share, combine, split};

/// All `k`-element subsets of `0..n`, in lexicographic order
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    extend(0, n, k, &mut Vec::new(), &mut out);
    out
}

fn random_secret(size: FieldSize, rng: &mut ChaCha20Rng) -> String {
    let mut bytes = vec![0u8; size.byte_len()];
    rng.fill_bytes(&mut bytes);
    HexCodec.encode(&bytes).unwrap()
}

fn pick(shares: &[Share], indices: &[usize]) -> Vec<Share> {
    indices.iter().map(|&i| shares[i].clone()).collect()
}

#[test]
fn test_concrete_scenario_gf128() {
    let secret = "000102030405060708090a0b0c0d0e0f";
    let shares = split(2, 3, secret, &HexCodec).unwrap();

    let indices: Vec<u8> = shares.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    let from_1_2 = combine(&pick(&shares, &[0, 1]), &HexCodec).unwrap();
    let from_1_3 = combine(&pick(&shares, &[0, 2]), &HexCodec).unwrap();
    let from_2_3 = combine(&pick(&shares, &[1, 2]), &HexCodec).unwrap();
    assert_eq!(from_1_2, secret);
    assert_eq!(from_1_3, secret);
    assert_eq!(from_2_3, secret);
}

#[test]
fn test_every_subset_every_field() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for size in FieldSize::ALL {
        let secret = random_secret(size, &mut rng);
        for (k, n) in [(2u8, 2u8), (2, 4), (3, 5), (4, 6)] {
            let shares = split(k, n, &secret, &HexCodec).unwrap();
            assert_eq!(shares.len(), n as usize);
            assert!(
                shares
                    .iter()
                    .all(|s| HexCodec.decode(&s.mnemonic).unwrap().len() == size.byte_len())
            );

            for subset in subsets(n as usize, k as usize) {
                let recovered = combine(&pick(&shares, &subset), &HexCodec).unwrap();
                assert_eq!(recovered, secret, "{size} k={k} n={n} subset={subset:?}");
            }
        }
    }
}

#[test]
fn test_share_order_does_not_matter() {
    let secret = "ffeeddccbbaa99887766554433221100ffeeddcc";
    let shares = split(3, 5, secret, &HexCodec).unwrap();
    let reversed: Vec<Share> = shares.iter().rev().cloned().collect();
    assert_eq!(combine(&reversed[..3], &HexCodec).unwrap(), secret);
    assert_eq!(combine(&reversed, &HexCodec).unwrap(), secret);
}

#[test]
fn test_fewer_than_threshold_gives_other_value() {
    let secret = "00".repeat(28);
    let shares = split(3, 5, &secret, &HexCodec).unwrap();
    let recovered = combine(&shares[..2], &HexCodec).unwrap();
    assert_ne!(recovered, secret);
}

#[test]
fn test_split_is_deterministic() {
    let secret = "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a6978";
    let first = split(3, 5, secret, &HexCodec).unwrap();
    let second = split(3, 5, secret, &HexCodec).unwrap();
    assert_eq!(first, second);

    // The threshold is part of the derivation, the share count is not
    let wider = split(3, 8, secret, &HexCodec).unwrap();
    assert_eq!(&wider[..5], &first[..]);
    let other_threshold = split(4, 5, secret, &HexCodec).unwrap();
    assert_ne!(other_threshold, first);
}

#[test]
fn test_secret_text_is_kdf_password() {
    // Same bytes, different text: the derived coefficients differ
    let lower = "abcdefabcdefabcdefabcdefabcdefab";
    let upper = "ABCDEFABCDEFABCDEFABCDEFABCDEFAB";
    let from_lower = split(2, 3, lower, &HexCodec).unwrap();
    let from_upper = split(2, 3, upper, &HexCodec).unwrap();
    assert_ne!(from_lower, from_upper);

    assert_eq!(combine(&from_upper[1..], &HexCodec).unwrap(), lower);
}

#[test]
fn test_parallel_mode_roundtrip() {
    let scheme = ShamirSeed::builder(10, 6)
        .with_config(Config::new().with_mode(EvalMode::Parallel))
        .build()
        .unwrap();
    let secret = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    let shares = scheme.split(secret).unwrap();
    assert_eq!(scheme.combine(&pick(&shares, &[9, 7, 5, 3, 1, 0])).unwrap(), secret);
}

#[test]
fn test_max_shares() {
    let scheme = ShamirSeed::builder(255, 4).build().unwrap();
    let secret = "00112233445566778899aabbccddeeff";
    let shares = scheme.split(secret).unwrap();
    assert_eq!(shares.len(), 255);
    assert_eq!(shares[254].index, 255);
    assert_eq!(scheme.combine(&pick(&shares, &[254, 127, 64, 3])).unwrap(), secret);
}
