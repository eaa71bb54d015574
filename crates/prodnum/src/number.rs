use core::fmt;

/// Default digit count for formatted product numbers ("001", "002", ...).
pub const DEFAULT_WIDTH: u8 = 3;

/// Maximum supported digit count.
///
/// Capped at 9 so every representable value (at most `10^9 - 1`) fits in a
/// `u32`.
pub const MAX_WIDTH: u8 = 9;

/// Errors produced while constructing or parsing a [`ProductNumber`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    /// The requested width is zero or exceeds [`MAX_WIDTH`].
    #[error("unsupported width: {width} (must be 1..={MAX_WIDTH})")]
    InvalidWidth { width: u8 },

    /// The input string's length is not a usable width.
    #[error("invalid length: {len}")]
    InvalidLength { len: usize },

    /// The input string contains a non-decimal byte.
    #[error("invalid decimal byte: {byte}")]
    InvalidDigit { byte: u8 },

    /// The value cannot be rendered at the given width.
    #[error("value {value} does not fit in width {width}")]
    Overflow { value: u32, width: u8 },
}

/// A fixed-width, zero-padded decimal product identifier.
///
/// A `ProductNumber` is issued once by an allocator and is immutable
/// thereafter: it carries its numeric value and the digit width it was
/// formatted at. Ordering is numeric first, so "999" sorts below "1000"
/// even across widths.
///
/// # Example
///
/// ```
/// use prodnum::ProductNumber;
///
/// let n = ProductNumber::new(9, 3).unwrap();
/// assert_eq!(n.to_string(), "009");
/// assert_eq!(n.next().unwrap().to_string(), "010");
/// assert_eq!(ProductNumber::parse("010").unwrap(), n.next().unwrap());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductNumber {
    value: u32,
    width: u8,
}

impl ProductNumber {
    /// Creates a product number from an explicit value and width.
    ///
    /// # Errors
    ///
    /// - [`NumberError::InvalidWidth`] if `width` is outside `1..=MAX_WIDTH`
    /// - [`NumberError::Overflow`] if `value >= 10^width`
    pub fn new(value: u32, width: u8) -> Result<Self, NumberError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(NumberError::InvalidWidth { width });
        }
        if value > Self::max_value(width) {
            return Err(NumberError::Overflow { value, width });
        }
        Ok(Self { value, width })
    }

    /// Returns the first issuable number at the given width, e.g. "001".
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidWidth`] if `width` is outside
    /// `1..=MAX_WIDTH`.
    pub fn first(width: u8) -> Result<Self, NumberError> {
        Self::new(1, width)
    }

    /// Parses a zero-padded decimal string, inferring the width from its
    /// length.
    ///
    /// # Errors
    ///
    /// - [`NumberError::InvalidLength`] if the input is empty or longer than
    ///   [`MAX_WIDTH`]
    /// - [`NumberError::InvalidDigit`] on the first non-decimal byte
    pub fn parse(s: &str) -> Result<Self, NumberError> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_WIDTH as usize {
            return Err(NumberError::InvalidLength { len: bytes.len() });
        }
        let mut value: u32 = 0;
        for &byte in bytes {
            if !byte.is_ascii_digit() {
                return Err(NumberError::InvalidDigit { byte });
            }
            value = value * 10 + u32::from(byte - b'0');
        }
        Ok(Self {
            value,
            width: bytes.len() as u8,
        })
    }

    /// Returns the successor at the same width.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::Overflow`] if the incremented value no longer
    /// fits, e.g. `next()` on "999".
    pub fn next(&self) -> Result<Self, NumberError> {
        Self::new(self.value + 1, self.width)
    }

    /// The numeric value of this identifier.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The digit width this identifier is formatted at.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// The largest value representable at `width` digits.
    const fn max_value(width: u8) -> u32 {
        10u32.pow(width as u32) - 1
    }
}

impl fmt::Display for ProductNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_leading_zeros() {
        let n = ProductNumber::new(7, 3).unwrap();
        assert_eq!(n.to_string(), "007");
        let n = ProductNumber::new(42, 5).unwrap();
        assert_eq!(n.to_string(), "00042");
    }

    #[test]
    fn round_trips_every_value_at_width_three() {
        for value in 0..1000 {
            let n = ProductNumber::new(value, 3).unwrap();
            let parsed = ProductNumber::parse(&n.to_string()).unwrap();
            assert_eq!(parsed, n);
            assert_eq!(parsed.value(), value);
        }
    }

    #[test]
    fn orders_numerically_across_widths() {
        let narrow = ProductNumber::parse("999").unwrap();
        let wide = ProductNumber::parse("1000").unwrap();
        assert!(narrow < wide);
    }

    #[test]
    fn rejects_value_too_large_for_width() {
        assert_eq!(
            ProductNumber::new(1000, 3),
            Err(NumberError::Overflow {
                value: 1000,
                width: 3
            })
        );
        assert!(ProductNumber::new(999, 3).is_ok());
    }

    #[test]
    fn rejects_unusable_widths() {
        assert_eq!(
            ProductNumber::new(1, 0),
            Err(NumberError::InvalidWidth { width: 0 })
        );
        assert_eq!(
            ProductNumber::new(1, MAX_WIDTH + 1),
            Err(NumberError::InvalidWidth {
                width: MAX_WIDTH + 1
            })
        );
        assert!(ProductNumber::first(MAX_WIDTH).is_ok());
    }

    #[test]
    fn rejects_non_decimal_input() {
        assert_eq!(
            ProductNumber::parse("0a1"),
            Err(NumberError::InvalidDigit { byte: b'a' })
        );
        assert_eq!(
            ProductNumber::parse(""),
            Err(NumberError::InvalidLength { len: 0 })
        );
        assert_eq!(
            ProductNumber::parse("0000000001"),
            Err(NumberError::InvalidLength { len: 10 })
        );
    }

    #[test]
    fn next_increments_and_overflows() {
        let n = ProductNumber::parse("009").unwrap();
        assert_eq!(n.next().unwrap().to_string(), "010");

        let n = ProductNumber::parse("099").unwrap();
        assert_eq!(n.next().unwrap().to_string(), "100");

        let n = ProductNumber::parse("999").unwrap();
        assert_eq!(
            n.next(),
            Err(NumberError::Overflow {
                value: 1000,
                width: 3
            })
        );
    }
}
