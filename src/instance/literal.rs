use std::fmt;
use std::num::NonZeroI64;

use super::Variable;

/// A signed, nonzero literal. The magnitude names the variable and the sign its polarity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI64);

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Literal {
    /// Panics if `var` is zero or does not fit a signed 64 bit literal.
    pub fn new(var: Variable, polarity: bool) -> Literal {
        if var.0 == 0 || var.0 > i64::MAX as u64 {
            panic!("variable out of range: {:?}", var);
        }
        let magnitude = var.0 as i64;
        Literal(match NonZeroI64::new(if polarity { magnitude } else { -magnitude }) {
            Some(value) => value,
            None => unreachable!(),
        })
    }

    /// Builds a literal from its signed encoding. Zero is not a literal.
    pub fn from_signed(value: i64) -> Option<Literal> {
        // i64::MIN has no positive counterpart, so it could never be inverted
        if value == i64::MIN {
            return None;
        }
        NonZeroI64::new(value).map(Literal)
    }

    pub fn to_signed(&self) -> i64 {
        self.0.get()
    }

    pub fn var(&self) -> Variable {
        Variable(self.0.get().unsigned_abs())
    }

    pub fn polarity(&self) -> bool {
        self.0.get() > 0
    }

    pub fn invert(&self) -> Literal {
        // Negating a nonzero value other than i64::MIN is nonzero
        Literal(-self.0)
    }
}

#[cfg(test)]
mod test {
    use crate::instance::*;

    #[test]
    fn test_literal_bookkeeping() {
        for idx in vec![1, 10000000, 1000, 1 << 46] {
            let var = Variable(idx);
            let lit = Literal::new(var, true);
            assert_eq!(lit.var(), var);
            assert_eq!(lit.invert().var(), var);
            assert_eq!(lit.polarity(), true);
            assert_eq!(lit.invert().polarity(), false);
            assert_eq!(lit.invert().invert(), lit);
        }
    }

    #[test]
    fn test_signed_encoding() {
        assert_eq!(Literal::from_signed(0), None);
        assert_eq!(Literal::from_signed(i64::MIN), None);

        let neg = Literal::from_signed(-7).unwrap();
        assert_eq!(neg.var(), Variable(7));
        assert!(!neg.polarity());
        assert_eq!(neg.to_signed(), -7);
        assert_eq!(neg.invert().to_signed(), 7);
        assert_eq!(format!("{:?}", neg), "-7");
    }

    #[test]
    #[should_panic]
    fn test_variable_zero_is_not_a_literal() {
        Literal::new(Variable(0), true);
    }
}
