//! Dense multi-dimensional container with explicit axis order.

use crate::fields::Axis;

/// A dense grid of scalars stored row-major in the declared axis order.
///
/// The flat storage order is exactly the wire order: iterating
/// [`values`](Grid::values) yields elements with the first axis outermost
/// and the last axis innermost. Out-of-range indices are a caller contract
/// violation and panic, mirroring slice indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    axes: &'static [Axis],
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// A grid of default-valued (zero) elements over the given axes.
    pub fn zeroed(axes: &'static [Axis]) -> Self {
        Self {
            axes,
            data: vec![T::default(); element_count(axes)],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every index, in wire order.
    pub fn from_fn(axes: &'static [Axis], mut f: impl FnMut(&[usize]) -> T) -> Self {
        let mut idx = vec![0usize; axes.len()];
        let count = element_count(axes);
        let mut data = Vec::with_capacity(count);
        for _ in 0..count {
            data.push(f(&idx));
            // Odometer increment, innermost axis fastest.
            for d in (0..axes.len()).rev() {
                idx[d] += 1;
                if idx[d] < axes[d].len() {
                    break;
                }
                idx[d] = 0;
            }
        }
        Self { axes, data }
    }

    /// Rebuild a grid from flat wire-order values.
    ///
    /// # Panics
    /// Panics if `data.len()` does not match the axes' element count.
    pub fn from_values(axes: &'static [Axis], data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            element_count(axes),
            "grid value count does not match axes"
        );
        Self { axes, data }
    }

    /// Axes of this grid, outer to inner.
    pub fn axes(&self) -> &'static [Axis] {
        self.axes
    }

    /// Dimension lengths, outer to inner.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.len()).collect()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat wire-order view of the elements.
    pub fn values(&self) -> &[T] {
        &self.data
    }

    fn offset(&self, idx: &[usize]) -> usize {
        assert_eq!(idx.len(), self.axes.len(), "grid index rank mismatch");
        let mut off = 0;
        for (d, (&i, axis)) in idx.iter().zip(self.axes).enumerate() {
            assert!(
                i < axis.len(),
                "index {i} out of range for axis {} (dim {}) at position {d}",
                axis.name(),
                axis.len()
            );
            off = off * axis.len() + i;
        }
        off
    }
}

impl<T: Copy> Grid<T> {
    /// Element at a multi-dimensional index, e.g. `[incident, azimuthal, energy, cycle]`.
    pub fn get(&self, idx: &[usize]) -> T {
        self.data[self.offset(idx)]
    }

    /// Overwrite the element at a multi-dimensional index.
    pub fn set(&mut self, idx: &[usize], value: T) {
        let off = self.offset(idx);
        self.data[off] = value;
    }
}

fn element_count(axes: &[Axis]) -> usize {
    axes.iter().map(|a| a.len()).product()
}
