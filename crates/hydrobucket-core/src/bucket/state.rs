/// Bucket model state.
///
/// The store level is the only quantity carried from one step to the next.
use super::constants::STATE_SIZE;
use super::params::Parameters;
use crate::error::BucketError;
use crate::traits::ModelState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Soil water storage [mm].
    pub storage: f64,
}

impl State {
    /// Start from `initial_storage`, as given. A level above capacity is left
    /// for the first step's overflow to drain.
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            storage: params.initial_storage,
        }
    }
}

impl ModelState for State {
    fn to_vec(&self) -> Vec<f64> {
        vec![self.storage]
    }

    fn from_slice(arr: &[f64]) -> Result<Self, BucketError> {
        if arr.len() != STATE_SIZE {
            return Err(BucketError::LengthMismatch {
                what: "state elements",
                expected: STATE_SIZE,
                actual: arr.len(),
            });
        }
        Ok(Self { storage: arr[0] })
    }

    fn array_len(&self) -> usize {
        STATE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_uses_initial_storage_unclamped() {
        let p = Parameters::new(0.3, 200.0, 0.1, 1e6, 1.0, 250.0).unwrap();
        assert_eq!(State::initialize(&p).storage, 250.0);
    }

    #[test]
    fn to_vec_from_slice_roundtrip() {
        let s = State { storage: 42.5 };
        let s2 = State::from_slice(&s.to_vec()).unwrap();
        assert_eq!(s, s2);
        assert_eq!(s.array_len(), 1);
    }

    #[test]
    fn from_slice_wrong_length() {
        assert!(State::from_slice(&[]).is_err());
        assert!(State::from_slice(&[1.0, 2.0]).is_err());
    }
}
