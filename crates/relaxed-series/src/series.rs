//! Lazily evaluated formal power series handles.
//!
//! A [`Series`] is a cheap handle to one stream node in a [`SeriesArena`].
//! Combinators allocate new nodes and never compute anything; coefficients
//! are produced on demand by [`Series::coeff`] and [`Series::range`], and
//! memoized so that every handle to the same node shares them.

use std::fmt;

use relaxed_rings::TwoAdicField;
use tracing::{debug, warn};

use crate::arena::SeriesArena;
use crate::error::{Result, SeriesError};
use crate::handle::NodeId;
use crate::mul::Product;
use crate::node::NodeKind;

/// Coefficient types the engine can run on.
pub trait SeriesCoeff: TwoAdicField + 'static {}

impl<T: TwoAdicField + 'static> SeriesCoeff for T {}

/// A formal power series over `F`, evaluated coefficient by coefficient.
pub struct Series<F> {
    arena: SeriesArena<F>,
    id: NodeId,
}

impl<F> Clone for Series<F> {
    fn clone(&self) -> Self {
        self.arena.inner().retain(self.id);
        Self {
            arena: self.arena.clone(),
            id: self.id,
        }
    }
}

impl<F> Drop for Series<F> {
    fn drop(&mut self) {
        self.arena.inner().release(self.id);
    }
}

impl<F: SeriesCoeff> fmt::Debug for Series<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("node", &self.id)
            .field("kind", &self.kind_name())
            .field("materialized", &self.materialized())
            .finish()
    }
}

impl<F: SeriesCoeff> Series<F> {
    pub(crate) fn from_parts(arena: SeriesArena<F>, id: NodeId) -> Self {
        arena.inner().retain(id);
        Self { arena, id }
    }

    /// Returns the node this handle refers to.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the arena owning this series.
    #[must_use]
    pub fn arena(&self) -> &SeriesArena<F> {
        &self.arena
    }

    /// Name of the stream kind behind this handle.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.arena.inner().node(self.id).kind.name()
    }

    /// Number of coefficients computed so far.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.arena.inner().node(self.id).len()
    }

    /// Returns the coefficient of `x^n`.
    ///
    /// # Panics
    ///
    /// Panics if evaluation reaches a placeholder that was never bound.
    #[must_use]
    pub fn coeff(&self, n: usize) -> F {
        self.arena.inner().coeff(self.id, n)
    }

    /// Returns the coefficients of `x^l, ..., x^(r-1)`.
    #[must_use]
    pub fn range(&self, l: usize, r: usize) -> Vec<F> {
        self.arena.inner().range(self.id, l, r)
    }

    /// Index of the first nonzero coefficient, searching the window given by
    /// [`crate::EngineConfig::valuation_scan_limit`].
    #[must_use]
    pub fn valuation(&self) -> Option<usize> {
        (0..self.arena.config().valuation_scan_limit).find(|&i| !self.coeff(i).is_zero())
    }

    fn unary(&self, kind: NodeKind<F>) -> Self {
        self.arena.make(kind)
    }

    pub(crate) fn binary(&self, other: &Self, make: impl FnOnce(NodeId, NodeId) -> NodeKind<F>) -> Self {
        assert!(self.arena.same(&other.arena), "{}", SeriesError::ArenaMismatch);
        self.arena.make(make(self.id, other.id))
    }

    // === Placeholders and inputs ===

    /// Binds a placeholder to the series it stands for.
    ///
    /// # Errors
    ///
    /// Fails if `self` is not a placeholder, is already bound, is bound to
    /// itself, or if `source` lives in another arena.
    pub fn bind(&self, source: &Self) -> Result<()> {
        if !self.arena.same(&source.arena) {
            return Err(SeriesError::ArenaMismatch);
        }
        let node = self.arena.inner().node(self.id);
        let NodeKind::Placeholder(target) = &node.kind else {
            return Err(SeriesError::NotAPlaceholder {
                node: self.id,
                kind: node.kind.name(),
            });
        };
        if source.id == self.id {
            return Err(SeriesError::SelfBinding { node: self.id });
        }
        target
            .set(source.id)
            .map_err(|_| SeriesError::AlreadyBound { node: self.id })?;
        debug!(placeholder = %self.id, source = %source.id, "bound placeholder");
        Ok(())
    }

    /// Sets slot `index` of an input series.
    ///
    /// # Errors
    ///
    /// Fails if `self` is not an input, if the coefficient at `index` was
    /// already read, or if `index` is past the slots of a fixed-size input.
    pub fn set(&self, index: usize, value: F) -> Result<()> {
        let node = self.arena.inner().node(self.id);
        let NodeKind::Input { slots, growable } = &node.kind else {
            return Err(SeriesError::NotAnInput {
                node: self.id,
                kind: node.kind.name(),
            });
        };
        if index < node.len() {
            return Err(SeriesError::AlreadyMaterialized { node: self.id, index });
        }

        let mut slots = slots.borrow_mut();
        if index >= slots.len() {
            if !growable {
                return Err(SeriesError::InputOutOfRange {
                    node: self.id,
                    index,
                    len: slots.len(),
                });
            }
            warn!(input = %self.id, from = slots.len(), to = index + 1, "resizing input series");
            slots.resize(index + 1, F::zero());
        }
        slots[index] = value;
        Ok(())
    }

    // === Combinators ===

    /// Multiplies every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: F) -> Self {
        self.unary(NodeKind::Scale(self.id, c))
    }

    /// Divides every coefficient by `c`.
    ///
    /// # Errors
    ///
    /// Fails if `c` is zero.
    pub fn div_scalar(&self, c: &F) -> Result<Self> {
        let c_inv = c.inv().ok_or(SeriesError::ZeroDivisor)?;
        Ok(self.scale(c_inv))
    }

    /// Drops the first `k` terms: coefficient `n` is `self[n + k]`.
    #[must_use]
    pub fn shl(&self, k: usize) -> Self {
        if k == 0 {
            return self.clone();
        }
        self.unary(NodeKind::ShiftLeft(self.id, k))
    }

    /// Multiplies by `x^k`: coefficient `n` is `self[n - k]`, zero below `k`.
    #[must_use]
    pub fn shr(&self, k: usize) -> Self {
        if k == 0 {
            return self.clone();
        }
        self.unary(NodeKind::ShiftRight(self.id, k))
    }

    /// The formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        self.unary(NodeKind::Derivative(self.id))
    }

    /// The formal antiderivative with constant term `c0`.
    ///
    /// Coefficient `n` divides by `n`, so it panics when `n` is a multiple
    /// of the characteristic.
    #[must_use]
    pub fn integral(&self, c0: F) -> Self {
        self.unary(NodeKind::Integral(self.id, c0))
    }

    /// Replaces the leading terms by `prefix`, keeping the rest of `self`.
    ///
    /// Index `n < prefix.len()` never reads `self`, which is how explicit
    /// initial terms are spliced onto a recursively defined tail.
    #[must_use]
    pub fn corner(&self, prefix: impl IntoIterator<Item = F>) -> Self {
        self.unary(NodeKind::Corner(self.id, prefix.into_iter().collect()))
    }

    /// Zeroes the first `k` terms without reading them.
    #[must_use]
    pub fn ignore(&self, k: usize) -> Self {
        self.corner(std::iter::repeat_with(F::zero).take(k))
    }

    /// Applies `f(n, self[n])` to every coefficient.
    #[must_use]
    pub fn map(&self, f: impl Fn(usize, F) -> F + 'static) -> Self {
        self.unary(NodeKind::Map(self.id, Box::new(f)))
    }

    /// The coefficient-wise product `self[n] * other[n]`.
    ///
    /// # Panics
    ///
    /// Panics if the series live in different arenas.
    #[must_use]
    pub fn hadamard(&self, other: &Self) -> Self {
        self.binary(other, NodeKind::Hadamard)
    }

    /// The coefficient-wise quotient `self[n] / other[n]`.
    ///
    /// # Panics
    ///
    /// Panics if the series live in different arenas, and on evaluation of
    /// an index where `other` is zero.
    #[must_use]
    pub fn hadamard_div(&self, other: &Self) -> Self {
        self.binary(other, NodeKind::HadamardDiv)
    }

    /// The Cauchy product, computed online.
    ///
    /// At index 0 the left operand is read first, and the right one only if
    /// the left constant term is nonzero. A self-referential operand therefore
    /// goes on the right of a factor with zero constant term, as in `x * g`.
    ///
    /// # Panics
    ///
    /// Panics if the series live in different arenas.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        self.binary(other, |a, b| NodeKind::Product(Product::new(a, b)))
    }

    /// Squares the series.
    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use relaxed_rings::{Ring, GF998244353 as F};

    fn f(n: i64) -> F {
        F::from_i64(n)
    }

    fn fs(values: &[i64]) -> Vec<F> {
        values.iter().copied().map(f).collect()
    }

    #[test]
    fn test_add_sub_scale() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2, 3]));
        let b = arena.fixed(fs(&[4, 5, 6]));

        assert_eq!((&a + &b).range(0, 3), fs(&[5, 7, 9]));
        assert_eq!((&b - &a).range(0, 3), fs(&[3, 3, 3]));
        assert_eq!(a.scale(f(2)).range(0, 4), fs(&[2, 4, 6, 0]));
        assert_eq!((-&a).range(0, 3), fs(&[-1, -2, -3]));
    }

    #[test]
    fn test_shifts() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2, 3, 4]));
        assert_eq!(a.shl(1).range(0, 4), fs(&[2, 3, 4, 0]));
        assert_eq!(a.shr(2).range(0, 6), fs(&[0, 0, 1, 2, 3, 4]));
        assert_eq!(a.shl(0).id(), a.id());
    }

    #[test]
    fn test_derivative_and_integral() {
        let arena = SeriesArena::new();
        // d/dx (1 + 2x + 3x²) = 2 + 6x
        let a = arena.fixed(fs(&[1, 2, 3]));
        assert_eq!(a.derivative().range(0, 3), fs(&[2, 6, 0]));

        // ∫(2 + 6x) = c + 2x + 3x²
        let d = arena.fixed(fs(&[2, 6]));
        assert_eq!(d.integral(f(7)).range(0, 4), fs(&[7, 2, 3, 0]));
    }

    #[test]
    fn test_corner_and_ignore() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2, 3, 4]));
        assert_eq!(a.corner(fs(&[9, 8])).range(0, 4), fs(&[9, 8, 3, 4]));
        assert_eq!(a.ignore(3).range(0, 5), fs(&[0, 0, 0, 4, 0]));
    }

    #[test]
    fn test_corner_prefix_does_not_read_parent() {
        let arena = SeriesArena::<F>::new();
        let p = arena.placeholder();
        let c = p.corner(fs(&[5, 6]));
        // Reading inside the prefix never touches the unbound placeholder.
        assert_eq!(c.range(0, 2), fs(&[5, 6]));
    }

    #[test]
    fn test_map_and_hadamard() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 2, 3]));
        let b = arena.fixed(fs(&[4, 5, 6]));
        let indexed = a.map(|n, v| v * F::from_u64(n as u64));
        assert_eq!(indexed.range(0, 3), fs(&[0, 2, 6]));
        assert_eq!(a.hadamard(&b).range(0, 3), fs(&[4, 10, 18]));
    }

    #[test]
    fn test_hadamard_div() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[2, 6, 12]));
        let b = arena.custom(|n| F::from_u64(n as u64 + 1));
        assert_eq!(a.hadamard_div(&b).range(0, 4), fs(&[2, 3, 4, 0]));
    }

    #[test]
    #[should_panic(expected = "of divisor")]
    fn test_hadamard_div_by_zero_coefficient() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[1, 1]));
        let b = arena.fixed(fs(&[1]));
        let _ = a.hadamard_div(&b).coeff(1);
    }

    #[test]
    fn test_div_scalar() {
        let arena = SeriesArena::new();
        let a = arena.fixed(fs(&[2, 4]));
        assert_eq!(a.div_scalar(&f(2)).unwrap().range(0, 2), fs(&[1, 2]));
        assert_eq!(a.div_scalar(&F::zero()).unwrap_err(), SeriesError::ZeroDivisor);
    }

    #[test]
    fn test_input_set_and_errors() {
        let arena = SeriesArena::new();
        let input = arena.input(3);
        input.set(0, f(5)).unwrap();
        input.set(2, f(7)).unwrap();
        assert_eq!(input.range(0, 2), fs(&[5, 0]));

        let err = input.set(1, f(1)).unwrap_err();
        assert_eq!(err, SeriesError::AlreadyMaterialized { node: input.id(), index: 1 });

        let err = input.set(3, f(1)).unwrap_err();
        assert_eq!(err, SeriesError::InputOutOfRange { node: input.id(), index: 3, len: 3 });
        assert_eq!(err.kind(), ErrorKind::StructuralViolation);

        assert_eq!(input.range(2, 5), fs(&[7, 0, 0]));
    }

    #[test]
    fn test_growable_input() {
        let arena = SeriesArena::new();
        let input = arena.growable_input(1);
        input.set(4, f(3)).unwrap();
        assert_eq!(input.range(0, 6), fs(&[0, 0, 0, 0, 3, 0]));
    }

    #[test]
    fn test_set_on_non_input() {
        let arena = SeriesArena::new();
        let a = arena.zero();
        assert_eq!(
            a.set(0, f(1)).unwrap_err(),
            SeriesError::NotAnInput { node: a.id(), kind: "fixed" }
        );
    }

    #[test]
    fn test_bind_errors() {
        let arena = SeriesArena::new();
        let p = arena.placeholder();
        let one = arena.constant(F::one());

        assert_eq!(p.bind(&p).unwrap_err(), SeriesError::SelfBinding { node: p.id() });
        p.bind(&one).unwrap();
        assert_eq!(p.bind(&one).unwrap_err(), SeriesError::AlreadyBound { node: p.id() });
        assert_eq!(
            one.bind(&p).unwrap_err(),
            SeriesError::NotAPlaceholder { node: one.id(), kind: "fixed" }
        );

        let other = SeriesArena::new();
        let q = other.placeholder();
        assert_eq!(q.bind(&one).unwrap_err(), SeriesError::ArenaMismatch);

        assert_eq!(p.range(0, 2), fs(&[1, 0]));
    }

    #[test]
    #[should_panic(expected = "different arenas")]
    fn test_mixing_arenas_panics() {
        let a = SeriesArena::<F>::new().zero();
        let b = SeriesArena::<F>::new().zero();
        let _ = &a + &b;
    }

    #[test]
    fn test_handles_share_the_cache() {
        let arena = SeriesArena::new();
        let a = arena.custom(|n| F::from_u64(n as u64));
        let b = a.clone();
        let _ = a.coeff(9);
        assert_eq!(b.materialized(), 10);
        assert_eq!(format!("{b:?}"), format!("Series {{ node: {:?}, kind: \"custom\", materialized: 10 }}", a.id()));
    }

    #[test]
    fn test_valuation() {
        let arena = SeriesArena::new();
        assert_eq!(arena.fixed(fs(&[0, 0, 3])).valuation(), Some(2));
        assert_eq!(arena.fixed(fs(&[1])).valuation(), Some(0));

        let small = SeriesArena::with_config(crate::EngineConfig::default().with_valuation_scan_limit(4));
        assert_eq!(small.monomial(f(1), 4).valuation(), None);
    }
}
