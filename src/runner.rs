//! Benchmark sequencing and reporting.
//!
//! A run moves through a fixed sequence of stages:
//!
//! ```text
//! Init -> Naive -> RegisterHinted -> CacheBlocked -> Vectorized -> Done
//! ```
//!
//! `Init` probes the cache, picks the block size and seeds the matrices.
//! Every variant stage reseeds A, B and C, times one multiplication and
//! prints one line. Nothing is retried.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::blocked::tiled::matmul_cache_blocked;
use crate::blocked::tiled_simd::{LANES, matmul_cache_blocked_simd};
use crate::blocked::{BlockSize, BlockSizeSelector, BlockSizeSource};
use crate::config::BenchConfig;
use crate::error::{BlockSizeError, MatMulError, Result};
use crate::matrix::hoisted::matmul_register_hinted;
use crate::matrix::naive::matmul_naive;
use crate::matrix::{Matrix, MatrixBuffers};
use crate::platform::CacheInfo;
use crate::timer::HighResTimer;

/// Largest relative difference from the naive result still counted as equal.
pub const VERIFY_TOLERANCE: f32 = 1e-3;

/// The four multiplication strategies, in benchmark order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Naive,
    RegisterHinted,
    CacheBlocked,
    Vectorized,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Naive,
        Variant::RegisterHinted,
        Variant::CacheBlocked,
        Variant::Vectorized,
    ];

    /// Name printed in the timing line.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Naive => "BasicMatMul",
            Variant::RegisterHinted => "WithRegisterMatMul",
            Variant::CacheBlocked => "CacheAwareMatMul",
            Variant::Vectorized => "CacheAwareSIMD",
        }
    }

    pub fn next(self) -> Option<Variant> {
        match self {
            Variant::Naive => Some(Variant::RegisterHinted),
            Variant::RegisterHinted => Some(Variant::CacheBlocked),
            Variant::CacheBlocked => Some(Variant::Vectorized),
            Variant::Vectorized => None,
        }
    }

    /// Runs this variant once over `buffers`, accumulating into C.
    ///
    /// `bs` is ignored by the untiled variants.
    pub fn run(self, buffers: &mut MatrixBuffers, bs: usize) -> std::result::Result<(), MatMulError> {
        let n = buffers.n();
        let (a, b, c) = buffers.operands();
        match self {
            Variant::Naive => matmul_naive(a, b, c, n),
            Variant::RegisterHinted => matmul_register_hinted(a, b, c, n),
            Variant::CacheBlocked => matmul_cache_blocked(a, b, c, n, bs)?,
            Variant::Vectorized => matmul_cache_blocked_simd(a, b, c, n, bs)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Run(Variant),
    Done,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Init => Stage::Run(Variant::Naive),
            Stage::Run(variant) => variant.next().map_or(Stage::Done, Stage::Run),
            Stage::Done => Stage::Done,
        }
    }
}

/// What happened to one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Ran to completion. `max_rel_err` is set when verification is on.
    Timed { millis: f64, max_rel_err: Option<f32> },
    /// Could not run with the selected block size.
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantSample {
    pub variant: Variant,
    pub outcome: Outcome,
}

/// Everything a finished run measured.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub n: usize,
    pub cache_size: usize,
    pub cache_line_size: usize,
    pub block_size: BlockSize,
    pub init_millis: f64,
    pub samples: Vec<VariantSample>,
}

/// Drives one benchmark pass from `Init` to `Done`.
pub struct BenchmarkRunner<C> {
    config: BenchConfig,
    selector: BlockSizeSelector<C>,
    buffers: MatrixBuffers,
    stage: Stage,
    block_size: Option<BlockSize>,
    init_millis: f64,
    reference: Option<Matrix>,
    samples: Vec<VariantSample>,
}

impl<C: CacheInfo> BenchmarkRunner<C> {
    /// Allocates the N×N buffers up front.
    pub fn new(config: BenchConfig, cache: C) -> Self {
        let selector = BlockSizeSelector::new(cache, config.fallback_block_size);
        let buffers = MatrixBuffers::new(config.n);
        Self {
            config,
            selector,
            buffers,
            stage: Stage::Init,
            block_size: None,
            init_millis: 0.0,
            reference: None,
            samples: Vec::with_capacity(Variant::ALL.len()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn buffers(&self) -> &MatrixBuffers {
        &self.buffers
    }

    /// Runs every remaining stage and returns the collected measurements.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchReport> {
        while self.stage != Stage::Done {
            self.advance(out)?;
        }

        let cache = self.selector.cache();
        Ok(BenchReport {
            n: self.config.n,
            cache_size: cache.cache_size(),
            cache_line_size: cache.cache_line_size(),
            block_size: self.block_size.ok_or(BlockSizeError::ZeroDimension)?,
            init_millis: self.init_millis,
            samples: self.samples.clone(),
        })
    }

    /// Executes the current stage and moves to the next one.
    pub fn advance<W: Write>(&mut self, out: &mut W) -> Result<Stage> {
        match self.stage {
            Stage::Init => self.init(out)?,
            Stage::Run(variant) => self.run_variant(variant, out)?,
            Stage::Done => return Ok(Stage::Done),
        }

        self.stage = self.stage.next();
        if self.stage == Stage::Done {
            writeln!(out, "Demo ended")?;
        }
        Ok(self.stage)
    }

    fn init<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let n = self.config.n;
        let block_size = match self.selector.select(n, LANES) {
            Ok(bs) => bs,
            Err(BlockSizeError::NoLaneAlignedTile { .. }) => {
                warn!(n, lanes = LANES, "no lane-aligned tile, vectorized variant will be skipped");
                self.selector.select(n, 1)?
            }
            Err(err) => return Err(err.into()),
        };
        self.block_size = Some(block_size);

        let cache = self.selector.cache();
        writeln!(out, "Cache Size = {} bytes", cache.cache_size())?;
        writeln!(out, "Cache Line = {} bytes", cache.cache_line_size())?;
        if block_size.source == BlockSizeSource::Fallback {
            writeln!(
                out,
                "Cache probe unavailable, using fallback block size {}",
                self.config.fallback_block_size
            )?;
        }
        writeln!(out, "Block Size = {}", block_size.edge)?;
        writeln!(out, "Matrices NxN where size N = {}", n)?;

        let timer = HighResTimer::start();
        self.buffers.reinitialize();
        self.init_millis = timer.elapsed_millis();
        writeln!(out, "Matrices initialized in {:5.3} ms", self.init_millis)?;

        Ok(())
    }

    fn run_variant<W: Write>(&mut self, variant: Variant, out: &mut W) -> Result<()> {
        let bs = self.block_size.map_or(1, |bs| bs.edge);
        self.buffers.reinitialize();

        let timer = HighResTimer::start();
        let result = variant.run(&mut self.buffers, bs);
        let millis = timer.elapsed_millis();

        let outcome = match result {
            Ok(()) => {
                writeln!(out, "{} finished in {:5.3} ms", variant.label(), millis)?;
                debug!(variant = variant.label(), millis, bs, "variant finished");
                Outcome::Timed {
                    millis,
                    max_rel_err: self.verify(variant),
                }
            }
            Err(err @ MatMulError::BlockNotLaneAligned { .. }) => {
                writeln!(out, "{} skipped: {}", variant.label(), err)?;
                warn!(variant = variant.label(), %err, "variant skipped");
                Outcome::Skipped(err.to_string())
            }
            Err(err) => return Err(err.into()),
        };

        self.samples.push(VariantSample { variant, outcome });
        Ok(())
    }

    /// Keeps the naive result as reference and compares later variants to it.
    fn verify(&mut self, variant: Variant) -> Option<f32> {
        if !self.config.verify {
            return None;
        }
        if variant == Variant::Naive {
            self.reference = Some(self.buffers.c.clone());
            return Some(0.0);
        }

        let reference = self.reference.as_ref()?;
        let err = self.buffers.c.max_relative_error(reference);
        if err > VERIFY_TOLERANCE {
            warn!(variant = variant.label(), max_rel_err = err, "result differs from naive");
        } else {
            info!(variant = variant.label(), max_rel_err = err, "result verified");
        }
        Some(err)
    }
}
