use rand::Rng;
use std::ops::{Add, Index, Mul, Sub};

use crate::error::{Error, Result};

/// Dense row-major grid of `f64`.
///
/// Every operation except [`Matrix::randomize_in_place`] leaves its operands
/// untouched and returns a freshly allocated matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Square matrix with ones on the diagonal.
    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::zeros(n, n);
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        res
    }

    /// Wraps `grid`, checking it against the declared shape.
    pub fn from_grid(rows: usize, cols: usize, grid: Vec<Vec<f64>>) -> Result<Matrix> {
        if grid.len() != rows {
            return Err(Error::dimension(
                "from_grid",
                (rows, cols),
                (grid.len(), grid.first().map_or(0, Vec::len)),
            ));
        }
        if let Some(row) = grid.iter().find(|row| row.len() != cols) {
            return Err(Error::dimension("from_grid", (rows, cols), (rows, row.len())));
        }

        Ok(Matrix { rows, cols, data: grid })
    }

    /// Builds a `1 × n` row vector.
    pub fn from_vector(values: &[f64]) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values.to_vec()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// Flattens the grid row by row.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product. Not matrix multiplication; see [`Matrix::dot`].
    pub fn multiply_elementwise(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "multiply_elementwise", |a, b| a * b)
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::dimension("dot", self.dim(), rhs.dim()));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j][i] = self.data[i][j];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Overwrites every cell with an independent sample from `[-1, 1)`.
    pub fn randomize_in_place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = rng.gen_range(-1.0..1.0);
            }
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.dim() != rhs.dim() {
            return Err(Error::dimension(op, self.dim(), rhs.dim()));
        }

        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(&a, &b)| f(a, b)).collect())
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i][j]
    }
}

impl<'a> Add for &'a Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::add(self, rhs)
    }
}

impl<'a> Sub for &'a Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

/// Matrix product, same as [`Matrix::dot`].
impl<'a> Mul for &'a Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(rhs)
    }
}
