//! Functions for computing the Internet checksum (RFC 1071).
//!
//! The checksum is the one's complement of the one's complement sum of the
//! buffer interpreted as big-endian 16-bit words. An odd trailing byte is
//! summed as if a zero byte followed it.

/// Add the big-endian 16-bit words of `data` to `initial`.
///
/// The accumulator is wider than 16 bits so that carries are kept until [`fold`]
/// is called. This lets callers sum several buffers (e.g. a pseudo-header and a
/// segment) without concatenating them, as long as every buffer except the last
/// one has an even length.
pub fn sum_words(data: &[u8], initial: u64) -> u64 {
    let mut chunks = data.chunks_exact(2);
    let mut sum = initial;
    for word in &mut chunks {
        sum += u16::from_be_bytes([word[0], word[1]]) as u64;
    }
    // Pad the odd byte with zero.
    if let [last] = chunks.remainder() {
        sum += u16::from_be_bytes([*last, 0]) as u64;
    }
    sum
}

/// Fold the carries of `sum` into 16 bits and return the one's complement.
pub fn fold(sum: u64) -> u16 {
    let mut sum = sum;
    // For a 32-bit sum this runs at most twice: once for the overflow of the
    // summation, once for the carry produced by the first fold.
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

/// Compute the Internet checksum of `data`.
pub fn internet_checksum(data: &[u8]) -> u16 {
    fold(sum_words(data, 0))
}

#[cfg(test)]
mod tests {
    use crate::checksum::{fold, internet_checksum, sum_words};

    #[test]
    fn test_empty() {
        assert_eq!(internet_checksum(&[]), 0xffff);
    }

    #[test]
    fn test_odd_length_padding() {
        assert_eq!(internet_checksum(&[0x01, 0x02, 0x03]), 0xfbfd);
        assert_eq!(
            internet_checksum(&[0x01, 0x02, 0x03]),
            internet_checksum(&[0x01, 0x02, 0x03, 0x00])
        );
        assert_eq!(internet_checksum(&[0xab]), internet_checksum(&[0xab, 0x00]));
    }

    #[test]
    fn test_length_matters() {
        // Appending zero words leaves the sum unchanged, appending other words does not.
        let data = [0x45, 0x00, 0x00, 0x3b];
        assert_eq!(
            internet_checksum(&data),
            internet_checksum(&[0x45, 0x00, 0x00, 0x3b, 0x00, 0x00])
        );
        assert_ne!(
            internet_checksum(&data),
            internet_checksum(&[0x45, 0x00, 0x00, 0x3b, 0x00, 0x01])
        );
    }

    #[test]
    fn test_double_carry() {
        // 3 * 0xffff + 0x0002 = 0x2ffff: the first fold gives 0x10001,
        // which needs a second fold to become 0x0002.
        let data = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x02];
        assert_eq!(sum_words(&data, 0), 0x2ffff);
        assert_eq!(internet_checksum(&data), 0xfffd);
    }

    #[test]
    fn test_all_ones() {
        // 64 words of 0xffff sum to 0x3fffc0 (> 2^17), which folds back to 0xffff.
        let data = [0xffu8; 128];
        assert!(sum_words(&data, 0) > 1 << 17);
        assert_eq!(internet_checksum(&data), 0x0000);
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold(0), 0xffff);
        assert_eq!(fold(0xffff), 0x0000);
        assert_eq!(fold(0x1_0000), 0xfffe);
        assert_eq!(fold(0xffff_ffff), 0x0000);
    }

    #[test]
    fn test_split_sum() {
        let header = [0x0a, 0x00, 0x02, 0x0f, 0x0a, 0x00, 0x02, 0x02];
        let payload = [0x07, 0xd0, 0x65, 0xf3, 0x61];
        let joined: Vec<u8> = header.iter().chain(payload.iter()).copied().collect();
        assert_eq!(
            fold(sum_words(&payload, sum_words(&header, 0))),
            internet_checksum(&joined)
        );
    }

    #[test]
    fn test_checksum_of_data_and_checksum_is_zero() {
        let mut data = vec![0x45, 0x00, 0x00, 0x3b, 0x00, 0x00, 0x00, 0x00];
        let checksum = internet_checksum(&data);
        data.extend_from_slice(&checksum.to_be_bytes());
        assert_eq!(internet_checksum(&data), 0x0000);
    }

    #[test]
    fn test_matches_pnet() {
        // pnet skips the word at index 1, which is zero here.
        let data = [0x52, 0x55, 0x00, 0x00, 0x02, 0x02, 0x52, 0x54];
        assert_eq!(internet_checksum(&data), pnet::util::checksum(&data, 1));
    }
}
