//! Core domain traits for the allocation engine.
//!
//! These are intentionally minimal. Concrete apps should implement them for
//! their own data models; `scenario` ships simple implementations.

/// An individual eligible to receive one unit of the resource.
pub trait Recipient {
    fn id(&self) -> u32;

    /// Location coordinates (x, y) on the planning plane.
    fn location(&self) -> (f64, f64);

    /// Priority level, 1 (lowest) to 5 (highest).
    fn priority(&self) -> u8;
}

/// A distribution site with a fixed number of interchangeable service slots.
pub trait Center {
    fn id(&self) -> u32;

    /// Location coordinates (x, y) on the planning plane.
    fn location(&self) -> (f64, f64);

    /// Number of staff slots. Signed so invalid input can be reported
    /// instead of being unrepresentable.
    fn capacity(&self) -> i64;
}

impl<T: Recipient + ?Sized> Recipient for &T {
    fn id(&self) -> u32 {
        (**self).id()
    }

    fn location(&self) -> (f64, f64) {
        (**self).location()
    }

    fn priority(&self) -> u8 {
        (**self).priority()
    }
}

impl<T: Center + ?Sized> Center for &T {
    fn id(&self) -> u32 {
        (**self).id()
    }

    fn location(&self) -> (f64, f64) {
        (**self).location()
    }

    fn capacity(&self) -> i64 {
        (**self).capacity()
    }
}

/// Dense recipient-by-center distances, indexed `[recipient][center]` in the
/// order the sequences were supplied.
pub type DistanceMatrix = Vec<Vec<f64>>;

/// Provides a distance matrix between recipients and centers.
pub trait DistanceMatrixProvider {
    fn matrix_for<R, C>(&self, recipients: &[R], centers: &[C]) -> DistanceMatrix
    where
        R: Recipient,
        C: Center;
}
