//! Walks through a few series defined by equations.
//!
//! Run with `cargo run -p relaxed --example series_demo`. Set
//! `RUST_LOG=relaxed_series=debug` to see placeholder bindings and input
//! growth, or `trace` for transform activity.

use relaxed::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type F = GF998244353;

fn show(name: &str, s: &Series<F>, n: usize) {
    let coeffs: Vec<String> = s.range(0, n).iter().map(ToString::to_string).collect();
    println!("{name:>12}: {}", coeffs.join(" "));
}

fn main() -> Result<(), SeriesError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let arena = SeriesArena::<F>::new();
    let one = arena.constant(F::one());
    let x = arena.monomial(F::one(), 1);

    // C = 1 + x C²
    let catalan = arena.placeholder();
    catalan.bind(&(&one + &(&x * &catalan.square())))?;
    show("catalan", &catalan, 12);

    // 1 / (1 - x - x²)
    let fib = arena.fixed(vec![F::one(), -F::one(), -F::one()]).inv()?;
    show("fibonacci", &fib, 12);

    // exp(x) scaled by n! gives back all ones.
    let e = x.exp()?;
    let scaled = e.map(|n, c| (1..=n as u64).fold(c, |acc, i| acc * F::from_u64(i)));
    show("n! [x^n] e^x", &scaled, 12);

    // sqrt(1 - 4x) = 1 - 2x C
    let root = arena.fixed(vec![F::one(), F::from_i64(-4)]).sqrt()?;
    show("sqrt(1-4x)", &root, 8);

    let cube = (&one + &x).pow(-3)?;
    show("(1+x)^-3", &cube, 8);

    // (1 - x²) / (1 - x) = 1 + x
    let quotient = (&one - &x.square()) / (&one - &x);
    show("(1-x²)/(1-x)", &quotient, 6);

    // An online input: the product only reads what has been fed.
    let input = arena.input(8);
    let running = &input * &fib;
    for n in 0..8u64 {
        input.set(n as usize, F::from_u64(n + 1))?;
        let _ = running.coeff(n as usize);
    }
    show("online", &running, 8);

    drop((fib, e, scaled, root, cube, quotient));
    let reclaimed = arena.collect();
    info!(reclaimed, nodes = arena.len(), "done");
    Ok(())
}
