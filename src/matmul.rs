//! Row-major GEMM kernel behind `Matrix::multiply`.
//!
//! - default: a simple, safe triple-loop implementation
//! - optional: a faster backend via the `matrixmultiply` feature

/// `c = a * b` for contiguous row-major buffers.
///
/// Shapes: `a` is `(m, k)`, `b` is `(k, n)`, `c` is `(m, n)`. `c` is overwritten.
#[inline]
pub(crate) fn matmul_f32(m: usize, n: usize, k: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    debug_assert!(m > 0 && n > 0 && k > 0);
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);

    // Shapes are validated by `Matrix::multiply`; keep this minimal and inlineable.

    #[cfg(feature = "matrixmultiply")]
    {
        // SAFETY: the three buffers hold exactly m*k, k*n and m*n elements (checked by the
        // caller), and the strides below describe dense row-major layouts of those shapes.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.as_ptr(),
                k as isize,
                1,
                b.as_ptr(),
                n as isize,
                1,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc = 0.0_f32;
            for (p, av) in a_row.iter().enumerate() {
                acc = av.mul_add(b[p * n + j], acc);
            }
            c[i * n + j] = acc;
        }
    }
}
