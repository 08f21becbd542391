//! Arena storage and pull-based evaluation of stream nodes.
//!
//! Every node of one series graph lives in a single arena and refers to its
//! parents by [`NodeId`]. Self-referential definitions therefore form index
//! cycles inside the arena rather than reference-count cycles.
//!
//! Nodes are reclaimed by mark and sweep: a node survives a collection if a
//! [`Series`] handle refers to it, if it is producing a coefficient, or if a
//! surviving node reads from it. Freed slots go on a free list and are reused
//! by later allocations. Collections run automatically every
//! [`EngineConfig::collect_interval`] allocations, or on demand through
//! [`SeriesArena::collect`].
//!
//! Requesting coefficient `k` of a node produces the missing indices
//! `len..=k` in order. Producing index `n` may recursively request
//! coefficients `<= n` of other nodes; well-founded definitions only ever
//! come back to a node below the index it is currently producing.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use relaxed_ntt::BlockTransform;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::SeriesError;
use crate::handle::NodeId;
use crate::node::{Node, NodeKind};
use crate::series::{Series, SeriesCoeff};

/// Node storage plus the resources shared by all nodes of one graph.
pub(crate) struct Arena<F> {
    nodes: RefCell<Vec<Option<Rc<Node<F>>>>>,
    free: RefCell<Vec<u32>>,
    /// Allocations left before the next automatic collection.
    until_collect: Cell<usize>,
    pub(crate) transform: BlockTransform<F>,
    pub(crate) config: EngineConfig,
}

impl<F> Arena<F> {
    pub(crate) fn node(&self, id: NodeId) -> Rc<Node<F>> {
        match self.nodes.borrow().get(id.index() as usize) {
            Some(Some(node)) => Rc::clone(node),
            _ => panic!("{id:?} was reclaimed while still referenced"),
        }
    }

    /// Number of live nodes.
    fn len(&self) -> usize {
        self.nodes.borrow().len() - self.free.borrow().len()
    }

    pub(crate) fn retain(&self, id: NodeId) {
        self.node(id).retain();
    }

    pub(crate) fn release(&self, id: NodeId) {
        if let Some(Some(node)) = self.nodes.borrow().get(id.index() as usize) {
            node.release();
        }
    }

    /// Frees every node that no handle, no producing node and no surviving
    /// node can reach. Returns the number of nodes freed.
    fn collect(&self) -> usize {
        let reclaimed = {
            let mut nodes = self.nodes.borrow_mut();
            let mut marked = vec![false; nodes.len()];
            let mut stack: Vec<NodeId> = nodes
                .iter()
                .zip(0u32..)
                .filter(|(slot, _)| slot.as_ref().is_some_and(|node| node.is_rooted()))
                .map(|(_, index)| NodeId::new(index))
                .collect();

            while let Some(id) = stack.pop() {
                let index = id.index() as usize;
                if std::mem::replace(&mut marked[index], true) {
                    continue;
                }
                if let Some(node) = &nodes[index] {
                    stack.extend(node.kind.parents());
                }
            }

            let mut free = self.free.borrow_mut();
            let mut reclaimed = Vec::new();
            for ((slot, keep), index) in nodes.iter_mut().zip(&marked).zip(0u32..) {
                if *keep {
                    continue;
                }
                if let Some(node) = slot.take() {
                    free.push(index);
                    reclaimed.push(node);
                }
            }
            reclaimed
        };

        // Dropping nodes may drop handles captured by their closures, which
        // reenter `release`; the storage borrow is over by now.
        let count = reclaimed.len();
        drop(reclaimed);
        count
    }

    /// Counts one allocation and collects once the interval is used up.
    fn note_allocation(&self) {
        let left = self.until_collect.get();
        if left > 1 {
            self.until_collect.set(left - 1);
            return;
        }

        let reclaimed = self.collect();
        let live = self.len();
        self.until_collect.set(self.config.collect_interval.max(live).max(1));
        trace!(reclaimed, live, "collected series nodes");
    }
}

impl<F: SeriesCoeff> Arena<F> {
    fn new(config: EngineConfig) -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            free: RefCell::new(Vec::new()),
            until_collect: Cell::new(config.collect_interval.max(1)),
            transform: BlockTransform::new(),
            config,
        }
    }

    pub(crate) fn alloc(&self, kind: NodeKind<F>) -> NodeId {
        let node = Some(Rc::new(Node::new(kind)));
        let mut nodes = self.nodes.borrow_mut();
        if let Some(index) = self.free.borrow_mut().pop() {
            nodes[index as usize] = node;
            return NodeId::new(index);
        }
        let index = u32::try_from(nodes.len()).expect("arena capacity exceeded");
        nodes.push(node);
        NodeId::new(index)
    }

    /// Coefficient `k` of node `id`, materializing every index up to `k`.
    ///
    /// # Panics
    ///
    /// Panics when evaluation reaches an unbound placeholder, and in debug
    /// builds when a node is asked for an index it is still producing.
    pub(crate) fn coeff(&self, id: NodeId, k: usize) -> F {
        let node = self.node(id);
        if let Some(value) = node.cached(k) {
            return value;
        }

        let producing = node.enter();
        debug_assert!(
            producing.is_some(),
            "{}",
            SeriesError::Cycle {
                node: id,
                index: node.len()
            }
        );

        loop {
            let n = node.len();
            let value = self.produce(id, &node, n);
            node.push(value.clone());
            if n == k {
                return value;
            }
        }
    }

    /// Coefficients `[l, r)` of node `id`.
    pub(crate) fn range(&self, id: NodeId, l: usize, r: usize) -> Vec<F> {
        if r <= l {
            return Vec::new();
        }
        self.coeff(id, r - 1);
        self.node(id).slice(l, r)
    }

    /// Transform of coefficients `[len/2, len)` zero-extended to `len`.
    ///
    /// Levels are built in order and never invalidated.
    pub(crate) fn dif_block(&self, id: NodeId, len: usize) -> Rc<[F]> {
        debug_assert!(len >= 2 && len.is_power_of_two(), "dif length {len}");
        self.coeff(id, len - 1);

        let node = self.node(id);
        let level = len.trailing_zeros() as usize - 1;
        while node.dif_levels() <= level {
            let half = 1usize << node.dif_levels();
            let mut block = node.slice(half, 2 * half);
            block.resize(2 * half, F::zero());
            self.transform.forward(&mut block);
            trace!(node = %id, len = 2 * half, "materialized dif block");
            node.push_dif(block.into());
        }
        node.dif(level)
    }

    fn produce(&self, id: NodeId, node: &Node<F>, n: usize) -> F {
        match &node.kind {
            NodeKind::Fixed(coeffs) => coeffs.get(n).cloned().unwrap_or_else(F::zero),
            NodeKind::Input { slots, .. } => slots.borrow().get(n).cloned().unwrap_or_else(F::zero),
            NodeKind::Custom(generator) => generator(n),
            NodeKind::Add(a, b) => self.coeff(*a, n) + self.coeff(*b, n),
            NodeKind::Sub(a, b) => self.coeff(*a, n) - self.coeff(*b, n),
            NodeKind::Scale(a, c) => self.coeff(*a, n) * c.clone(),
            NodeKind::ShiftLeft(a, k) => self.coeff(*a, n + k),
            NodeKind::ShiftRight(a, k) => {
                if n >= *k {
                    self.coeff(*a, n - k)
                } else {
                    F::zero()
                }
            }
            NodeKind::Derivative(a) => self.coeff(*a, n + 1) * F::from_u64(n as u64 + 1),
            NodeKind::Integral(a, c0) => {
                if n == 0 {
                    return c0.clone();
                }
                let Some(n_inv) = F::from_u64(n as u64).inv() else {
                    panic!("integral coefficient {n} divides by the characteristic");
                };
                self.coeff(*a, n - 1) * n_inv
            }
            NodeKind::Corner(a, prefix) => match prefix.get(n) {
                Some(value) => value.clone(),
                None => self.coeff(*a, n),
            },
            NodeKind::Map(a, mapper) => mapper(n, self.coeff(*a, n)),
            NodeKind::Hadamard(a, b) => self.coeff(*a, n) * self.coeff(*b, n),
            NodeKind::HadamardDiv(a, b) => {
                let Some(d_inv) = self.coeff(*b, n).inv() else {
                    panic!("coefficient {n} of divisor {b} is zero");
                };
                self.coeff(*a, n) * d_inv
            }
            NodeKind::Product(product) => self.produce_product(product, n),
            NodeKind::Placeholder(target) => match target.get() {
                Some(source) => self.coeff(*source, n),
                None => panic!("{}", SeriesError::UnboundPlaceholder { node: id }),
            },
        }
    }
}

/// Owner of a series graph.
///
/// Cloning the arena is cheap and yields another handle to the same graph.
/// Series built from different arenas cannot be combined.
pub struct SeriesArena<F> {
    inner: Rc<Arena<F>>,
}

impl<F> Clone for SeriesArena<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F: SeriesCoeff> Default for SeriesArena<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for SeriesArena<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesArena")
            .field("nodes", &self.inner.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl<F> SeriesArena<F> {
    pub(crate) fn inner(&self) -> &Arena<F> {
        &self.inner
    }
}

impl<F: SeriesCoeff> SeriesArena<F> {
    /// Creates an arena with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an arena with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        debug!(?config, "created series arena");
        Self {
            inner: Rc::new(Arena::new(config)),
        }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Returns the number of live nodes in the arena.
    ///
    /// Unreachable nodes count until the next collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Frees every node no live series can reach, and returns how many.
    pub fn collect(&self) -> usize {
        let reclaimed = self.inner.collect();
        debug!(reclaimed, live = self.inner.len(), "collected series nodes");
        reclaimed
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both handles refer to the same arena.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn make(&self, kind: NodeKind<F>) -> Series<F> {
        let id = self.inner.alloc(kind);
        let series = Series::from_parts(self.clone(), id);
        self.inner.note_allocation();
        series
    }

    // === Primitive streams ===

    /// A series with the given leading coefficients and zeros after them.
    pub fn fixed(&self, coeffs: impl Into<Vec<F>>) -> Series<F> {
        self.make(NodeKind::Fixed(coeffs.into()))
    }

    /// The constant series `c`.
    pub fn constant(&self, c: F) -> Series<F> {
        self.fixed(vec![c])
    }

    /// The zero series.
    pub fn zero(&self) -> Series<F> {
        self.fixed(Vec::new())
    }

    /// The series `c * x^degree`.
    pub fn monomial(&self, c: F, degree: usize) -> Series<F> {
        let mut coeffs = vec![F::zero(); degree + 1];
        coeffs[degree] = c;
        self.fixed(coeffs)
    }

    /// A series fed through [`Series::set`], with `len` settable slots.
    ///
    /// Unset slots and everything past them read as zero.
    pub fn input(&self, len: usize) -> Series<F> {
        self.make(NodeKind::Input {
            slots: RefCell::new(vec![F::zero(); len]),
            growable: false,
        })
    }

    /// Like [`SeriesArena::input`], but setting past the slots grows them.
    pub fn growable_input(&self, len: usize) -> Series<F> {
        self.make(NodeKind::Input {
            slots: RefCell::new(vec![F::zero(); len]),
            growable: true,
        })
    }

    /// A series whose coefficient `n` is `generator(n)`.
    pub fn custom(&self, generator: impl Fn(usize) -> F + 'static) -> Series<F> {
        self.make(NodeKind::Custom(Box::new(generator)))
    }

    /// An unbound placeholder, to be bound once with [`Series::bind`].
    ///
    /// Used to define a series by an equation that mentions the series
    /// itself: build the right-hand side from the placeholder, then bind.
    pub fn placeholder(&self) -> Series<F> {
        self.make(NodeKind::Placeholder(OnceCell::new()))
    }
}
