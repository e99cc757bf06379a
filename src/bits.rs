//! Width-parameterized bit manipulation on 128-bit integers.

/// Returns an all-ones mask of the low `width` bits.
pub const fn mask(width: u32) -> u128 {
    if width >= u128::BITS {
        u128::MAX
    } else {
        (1 << width) - 1
    }
}

/// Returns `value` shifted right by `offset`, keeping only `length` bits when given.
pub const fn extract_slice(value: u128, offset: u32, length: Option<u32>) -> u128 {
    let shifted = if offset >= u128::BITS {
        0
    } else {
        value >> offset
    };
    match length {
        Some(length) => shifted & mask(length),
        None => shifted,
    }
}

/// Overwrites the `bit_count` bits ending at `high_bit` (inclusive) with the low bits of `bits`.
///
/// # Panics
///
/// Panics if the span does not fit below `high_bit`.
pub const fn set_high_bits(value: u128, bits: u128, bit_count: u32, high_bit: u32) -> u128 {
    assert!(
        bit_count <= high_bit + 1 && high_bit < u128::BITS,
        "high bit number is smaller than bit number in value"
    );
    let low = high_bit + 1 - bit_count;
    let span = mask(bit_count) << low;
    (value & !span) | ((bits & mask(bit_count)) << low)
}

/// Tells whether `value` can be written with `width` bits.
pub const fn fits(value: u128, width: u32) -> bool {
    value & !mask(width) == 0
}
