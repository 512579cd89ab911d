//! Owned storage for the three benchmark operands.

use std::ops::{Index, IndexMut};

/// N×N matrix of `f32`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Builds a matrix from `f(row, col)`.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Self { n, data }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Largest `|self - other| / max(|other|, 1)` over all elements.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn max_relative_error(&self, other: &Matrix) -> f32 {
        assert_eq!(self.n, other.n, "dimension mismatch: {} vs {}", self.n, other.n);
        self.data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| (x - y).abs() / y.abs().max(1.0))
            .fold(0.0, f32::max)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[row * self.n + col]
    }
}

/// Operands A, B and accumulator C, all N×N.
///
/// Allocated once; [`reinitialize`](Self::reinitialize) resets them before
/// every variant so each run starts from identical input.
#[derive(Debug, Clone)]
pub struct MatrixBuffers {
    pub a: Matrix,
    pub b: Matrix,
    pub c: Matrix,
}

impl MatrixBuffers {
    /// Allocates and seeds three N×N matrices.
    pub fn new(n: usize) -> Self {
        let mut buffers = Self {
            a: Matrix::zeros(n),
            b: Matrix::zeros(n),
            c: Matrix::zeros(n),
        };
        buffers.reinitialize();
        buffers
    }

    pub fn n(&self) -> usize {
        self.a.n()
    }

    /// `A[i][j] = B[i][j] = i + j`, `C = 0`.
    pub fn reinitialize(&mut self) {
        let n = self.n();
        let (a, b, c) = (
            self.a.as_mut_slice(),
            self.b.as_mut_slice(),
            self.c.as_mut_slice(),
        );
        for i in 0..n {
            for j in 0..n {
                let seed = (i + j) as f32;
                a[i * n + j] = seed;
                b[i * n + j] = seed;
                c[i * n + j] = 0.0;
            }
        }
    }

    /// Borrows A and B for reading and C for writing at the same time.
    pub fn operands(&mut self) -> (&[f32], &[f32], &mut [f32]) {
        (self.a.as_slice(), self.b.as_slice(), self.c.as_mut_slice())
    }
}
