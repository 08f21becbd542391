//! Stream nodes.
//!
//! A node is one coefficient stream: a closed set of kinds, each producing
//! coefficient `n` from its parents, plus the memoized coefficients and the
//! dif cache shared by every kind. Nodes also count the [`crate::Series`]
//! handles pointing at them, which roots them for collection.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

use smallvec::{smallvec, SmallVec};

use crate::handle::NodeId;
use crate::mul::Product;

/// Explicit leading terms spliced in front of a stream.
pub(crate) type Prefix<F> = SmallVec<[F; 4]>;

/// Index → value rule of a custom stream.
pub(crate) type Generator<F> = Box<dyn Fn(usize) -> F>;

/// `(index, parent coefficient) → value` rule of a map stream.
pub(crate) type Mapper<F> = Box<dyn Fn(usize, F) -> F>;

/// How a node produces its next coefficient.
pub(crate) enum NodeKind<F> {
    /// Literal coefficients, zero beyond the table.
    Fixed(Vec<F>),
    /// Caller-settable slots, zero beyond them.
    Input { slots: RefCell<Vec<F>>, growable: bool },
    Custom(Generator<F>),
    Add(NodeId, NodeId),
    Sub(NodeId, NodeId),
    Scale(NodeId, F),
    /// `a[n + k]`
    ShiftLeft(NodeId, usize),
    /// `a[n - k]`, zero below `k`
    ShiftRight(NodeId, usize),
    Derivative(NodeId),
    /// Integral with the given constant term.
    Integral(NodeId, F),
    Corner(NodeId, Prefix<F>),
    Map(NodeId, Mapper<F>),
    /// Coefficient-wise product.
    Hadamard(NodeId, NodeId),
    /// Coefficient-wise quotient.
    HadamardDiv(NodeId, NodeId),
    /// Cauchy product, computed online.
    Product(Product<F>),
    /// Bound at most once to the stream it forwards to.
    Placeholder(OnceCell<NodeId>),
}

impl<F> NodeKind<F> {
    /// Short name of the stream kind, used in diagnostics.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Input { .. } => "input",
            Self::Custom(_) => "custom",
            Self::Add(..) => "add",
            Self::Sub(..) => "sub",
            Self::Scale(..) => "scale",
            Self::ShiftLeft(..) => "shift-left",
            Self::ShiftRight(..) => "shift-right",
            Self::Derivative(_) => "derivative",
            Self::Integral(..) => "integral",
            Self::Corner(..) => "corner",
            Self::Map(..) => "map",
            Self::Hadamard(..) => "hadamard",
            Self::HadamardDiv(..) => "hadamard-div",
            Self::Product(_) => "product",
            Self::Placeholder(_) => "placeholder",
        }
    }

    /// Nodes this one reads from. A pending placeholder has none.
    pub(crate) fn parents(&self) -> SmallVec<[NodeId; 2]> {
        match self {
            Self::Fixed(_) | Self::Input { .. } | Self::Custom(_) => SmallVec::new(),
            Self::Add(a, b) | Self::Sub(a, b) | Self::Hadamard(a, b) | Self::HadamardDiv(a, b) => {
                smallvec![*a, *b]
            }
            Self::Scale(a, _)
            | Self::ShiftLeft(a, _)
            | Self::ShiftRight(a, _)
            | Self::Integral(a, _)
            | Self::Corner(a, _)
            | Self::Map(a, _)
            | Self::Derivative(a) => smallvec![*a],
            Self::Product(product) => smallvec![product.lhs, product.rhs],
            Self::Placeholder(target) => target.get().copied().into_iter().collect(),
        }
    }
}

/// A memoized coefficient stream.
pub(crate) struct Node<F> {
    pub(crate) kind: NodeKind<F>,
    coeffs: RefCell<Vec<F>>,
    /// Level `j` holds the transform of `coeffs[2^j..2^(j+1))` padded to `2^(j+1)`.
    dif: RefCell<Vec<Rc<[F]>>>,
    busy: Cell<bool>,
    /// Live `Series` handles referring to this node.
    handles: Cell<usize>,
}

impl<F: Clone> Node<F> {
    pub(crate) fn new(kind: NodeKind<F>) -> Self {
        Self {
            kind,
            coeffs: RefCell::new(Vec::new()),
            dif: RefCell::new(Vec::new()),
            busy: Cell::new(false),
            handles: Cell::new(0),
        }
    }

    /// Number of materialized coefficients.
    pub(crate) fn len(&self) -> usize {
        self.coeffs.borrow().len()
    }

    pub(crate) fn cached(&self, k: usize) -> Option<F> {
        self.coeffs.borrow().get(k).cloned()
    }

    pub(crate) fn push(&self, value: F) {
        self.coeffs.borrow_mut().push(value);
    }

    /// Materialized coefficients `[l, r)`.
    pub(crate) fn slice(&self, l: usize, r: usize) -> Vec<F> {
        self.coeffs.borrow()[l..r].to_vec()
    }

    pub(crate) fn dif_levels(&self) -> usize {
        self.dif.borrow().len()
    }

    pub(crate) fn dif(&self, level: usize) -> Rc<[F]> {
        Rc::clone(&self.dif.borrow()[level])
    }

    pub(crate) fn push_dif(&self, block: Rc<[F]>) {
        self.dif.borrow_mut().push(block);
    }
}

impl<F> Node<F> {
    /// Marks the node as extending its cache until the guard is dropped.
    /// Returns `None` if it already was.
    pub(crate) fn enter(&self) -> Option<Producing<'_, F>> {
        if self.busy.replace(true) {
            None
        } else {
            Some(Producing(self))
        }
    }

    pub(crate) fn retain(&self) {
        self.handles.set(self.handles.get() + 1);
    }

    pub(crate) fn release(&self) {
        self.handles.set(self.handles.get().saturating_sub(1));
    }

    /// True while a handle refers to the node or it is producing a coefficient.
    pub(crate) fn is_rooted(&self) -> bool {
        self.handles.get() > 0 || self.busy.get()
    }
}

/// Clears the busy flag of a node when dropped, unwinding included.
pub(crate) struct Producing<'a, F>(&'a Node<F>);

impl<F> Drop for Producing<'_, F> {
    fn drop(&mut self) {
        self.0.busy.set(false);
    }
}
