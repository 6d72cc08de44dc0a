//! Integer bookkeeping over basis blade identifiers.
//!
//! A blade identifier is a bitmask: bit `i` set means basis vector `e(i+1)`
//! participates in the blade. Identifier `0` is the scalar blade.
//!
//! # Examples
//!
//! | Identifier | Blade | Grade |
//! |------------|-------|-------|
//! | `0b000` | `1` | 0 |
//! | `0b001` | `e1` | 1 |
//! | `0b011` | `e1^e2` | 2 |
//! | `0b111` | `e1^e2^e3` | 3 |
//!
//! All functions here are exact bit operations.

/// Largest supported vector space dimension (identifiers are `u64`).
pub const MAX_VSPACE_DIM: u32 = 63;

/// Number of basis vectors in the blade.
#[must_use]
#[inline]
pub const fn grade(id: u64) -> u32 {
    id.count_ones()
}

/// Identifier of the single basis vector with 1-based index `index`.
#[must_use]
#[inline]
pub const fn basis_vector_id(index: u32) -> u64 {
    debug_assert!(index >= 1 && index <= MAX_VSPACE_DIM);
    1 << (index - 1)
}

/// Identifier with all `vspace_dim` basis vectors set (the pseudoscalar).
#[must_use]
#[inline]
pub const fn pseudoscalar_id(vspace_dim: u32) -> u64 {
    if vspace_dim >= 64 {
        u64::MAX
    } else {
        (1u64 << vspace_dim) - 1
    }
}

/// Whether `id` names a blade inside a space of dimension `vspace_dim`.
#[must_use]
#[inline]
pub const fn fits_in(id: u64, vspace_dim: u32) -> bool {
    id & !pseudoscalar_id(vspace_dim) == 0
}

/// Smallest vector space dimension containing `id`.
#[must_use]
#[inline]
pub const fn min_vspace_dim(id: u64) -> u32 {
    64 - id.leading_zeros()
}

/// 1-based indices of the basis vectors in `id`, ascending.
pub fn basis_vector_indices(id: u64) -> impl Iterator<Item = u32> {
    (0..64u32).filter(move |i| id >> i & 1 == 1).map(|i| i + 1)
}

/// Whether `id2` is the orthogonal complement of `id1` in a space of
/// dimension `vspace_dim`.
#[must_use]
#[inline]
pub const fn is_orthogonal_complement(id1: u64, id2: u64, vspace_dim: u32) -> bool {
    id1 & id2 == 0 && id1 | id2 == pseudoscalar_id(vspace_dim)
}

/// Number of transpositions needed to bring the merged index list of the two
/// blades into canonical order, modulo 2.
#[inline]
const fn reorder_parity(id1: u64, id2: u64) -> u32 {
    let mut a = id1 >> 1;
    let mut swaps = 0;
    while a != 0 {
        swaps += (a & id2).count_ones();
        a >>= 1;
    }
    swaps & 1
}

/// Whether the Euclidean geometric product of the two basis blades carries a
/// negative sign.
#[must_use]
#[inline]
pub const fn is_negative_gp(id1: u64, id2: u64) -> bool {
    reorder_parity(id1, id2) == 1
}

/// Sign of the geometric product under a diagonal signature.
///
/// `negative_mask` flags the basis vectors squaring to `-1`; each of them
/// shared by both blades contributes one extra sign flip.
#[must_use]
#[inline]
pub const fn is_negative_gp_signature(id1: u64, id2: u64, negative_mask: u64) -> bool {
    (reorder_parity(id1, id2) + (id1 & id2 & negative_mask).count_ones()) & 1 == 1
}

/// Outer product of blades sharing a basis vector vanishes.
#[must_use]
#[inline]
pub const fn is_non_zero_outer(id1: u64, id2: u64) -> bool {
    id1 & id2 == 0
}

#[must_use]
#[inline]
pub const fn is_non_zero_scalar_product(id1: u64, id2: u64) -> bool {
    id1 == id2
}

/// Left contraction `A _| B` survives only when `A` is contained in `B`.
#[must_use]
#[inline]
pub const fn is_non_zero_left_contraction(id1: u64, id2: u64) -> bool {
    id1 & !id2 == 0
}

/// Right contraction `A |_ B` survives only when `B` is contained in `A`.
#[must_use]
#[inline]
pub const fn is_non_zero_right_contraction(id1: u64, id2: u64) -> bool {
    id2 & !id1 == 0
}

/// Hestenes inner product: zero whenever either operand is scalar, otherwise
/// non-zero iff the result grade is `|grade(id1) - grade(id2)|`.
#[must_use]
#[inline]
pub const fn is_non_zero_hestenes_inner(id1: u64, id2: u64) -> bool {
    id1 != 0
        && id2 != 0
        && grade(id1 ^ id2) == grade(id1).abs_diff(grade(id2))
}

/// Commutator product `(ab - ba)/2` survives iff the blades anticommute.
#[must_use]
#[inline]
pub const fn is_non_zero_commutator(id1: u64, id2: u64) -> bool {
    is_negative_gp(id1, id2) != is_negative_gp(id2, id1)
}

/// Anti-commutator product `(ab + ba)/2` survives iff the blades commute.
#[must_use]
#[inline]
pub const fn is_non_zero_anti_commutator(id1: u64, id2: u64) -> bool {
    is_negative_gp(id1, id2) == is_negative_gp(id2, id1)
}

/// Reversion negates blades whose grade is 2 or 3 modulo 4.
#[must_use]
#[inline]
pub const fn has_negative_reverse(id: u64) -> bool {
    grade(id) % 4 >= 2
}

/// Grade involution negates odd blades.
#[must_use]
#[inline]
pub const fn has_negative_grade_involution(id: u64) -> bool {
    grade(id) % 2 == 1
}

/// Clifford conjugation negates blades whose grade is 1 or 2 modulo 4.
#[must_use]
#[inline]
pub const fn has_negative_clifford_conjugate(id: u64) -> bool {
    matches!(grade(id) % 4, 1 | 2)
}
