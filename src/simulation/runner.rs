//! Simulation runner implementation.
//!
//! Provides the single entry point that turns a configuration and initial
//! data into an evolved field.

use std::path::PathBuf;

use tracing::{debug, info};

use super::SimulationConfig;
use crate::boundary::{pad_field, GhostLayout};
use crate::engine::{EngineError, EngineInput, IntegrationEngine, SolverVariant};
use crate::equations::IdealGas;
use crate::error::{Result, SetupError};
use crate::mesh::GridGeometry;
use crate::setup::{InitialState, RiemannProblem};
use crate::state::{
    check_companion, ConservedField, ConservedState, LorentzFactorField, PrimitiveState,
};
use crate::types::Regime;

// =============================================================================
// Starting point
// =============================================================================

/// Where a run takes its initial conserved field from.
#[derive(Clone, Debug, PartialEq)]
pub enum StartFrom {
    /// Build from primitive or two-state initial data
    Fresh(InitialState),
    /// Continue from an unpadded conserved state at `time`
    Resume { state: ConservedState, time: f64 },
    /// Load an already padded state through the engine
    Checkpoint(PathBuf),
}

impl From<InitialState> for StartFrom {
    fn from(initial: InitialState) -> Self {
        Self::Fresh(initial)
    }
}

impl From<RiemannProblem> for StartFrom {
    fn from(problem: RiemannProblem) -> Self {
        Self::Fresh(problem.into())
    }
}

impl From<PrimitiveState> for StartFrom {
    fn from(state: PrimitiveState) -> Self {
        Self::Fresh(state.into())
    }
}

impl From<ConservedState> for StartFrom {
    fn from(state: ConservedState) -> Self {
        Self::Resume { state, time: 0.0 }
    }
}

// =============================================================================
// Simulation Output
// =============================================================================

/// Result of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutput {
    /// Evolved conserved field, ghost cells removed
    pub conserved: ConservedField,
    /// Cell centres of `conserved`
    pub grid: GridGeometry,
    /// Engine entry point that produced the field
    pub variant: SolverVariant,
    pub gas: IdealGas,
    /// Simulation time of `conserved`
    pub time: f64,
}

impl SimulationOutput {
    /// Recover density, pressure and velocity from the evolved field.
    pub fn primitives(&self) -> Result<PrimitiveState> {
        self.conserved.to_primitive(self.gas, None)
    }

    #[inline]
    pub fn regime(&self) -> Regime {
        self.conserved.regime()
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Prepares engine input, dispatches to one of the four solver variants and
/// post-processes the result.
///
/// A run proceeds as
///
/// 1. validate the configuration and initial data
/// 2. build conserved variables (and Lorentz factors)
/// 3. construct the grid from the interior shape
/// 4. pad ghost cells according to order and boundary mode
/// 5. select the variant from `(dimensionality, regime)`
/// 6. invoke the engine
/// 7. check the output shape and strip ghost cells
///
/// Configuration and domain errors surface before the engine is called.
/// Engine errors are returned as [`SetupError::Engine`] unchanged.
pub struct Simulation<E: IntegrationEngine> {
    engine: E,
    config: SimulationConfig,
}

impl<E: IntegrationEngine> Simulation<E> {
    pub fn new(engine: E, config: SimulationConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Run from `start` to the configured end time.
    pub fn run(&mut self, start: impl Into<StartFrom>) -> Result<SimulationOutput> {
        let config = &self.config;
        config.validate()?;
        let gas = config.gas()?;
        let regime = config.regime;
        let dims = config.dimensionality();

        info!(
            engine = self.engine.name(),
            regime = %regime,
            dims = %dims,
            order = %config.order,
            boundary = %config.boundary,
            points = %config.point_counts,
            "starting simulation"
        );

        // 1-2. Initial conserved state
        let (mut state, start_time, from_checkpoint) = match start.into() {
            StartFrom::Fresh(initial) => {
                let state_dims = initial.dimensionality()?;
                if state_dims != dims {
                    return Err(SetupError::DimensionalityMismatch(format!(
                        "initial state is {} but the grid {} is {}",
                        state_dims, config.point_counts, dims
                    )));
                }
                let state = initial.build(gas, regime, &config.geometry, config.point_counts)?;
                (state, 0.0, false)
            }
            StartFrom::Resume { state, time } => (state, time, false),
            StartFrom::Checkpoint(path) => {
                let checkpoint = self.engine.load_checkpoint(&path)?;
                info!(
                    path = %path.display(),
                    time = checkpoint.time,
                    "resuming from checkpoint"
                );
                let state = ConservedState {
                    conserved: checkpoint.conserved,
                    lorentz: checkpoint.lorentz,
                };
                (state, checkpoint.time, true)
            }
        };
        complete_state(config, gas, &mut state)?;

        if start_time > config.end_time {
            return Err(SetupError::invalid(
                "end_time",
                config.end_time,
                format!("run starts at t = {}", start_time),
            ));
        }

        let mut sources = match &config.source_terms {
            Some(values) => ConservedField::from_raw(
                regime,
                config.point_counts,
                GhostLayout::none(),
                values.clone(),
            )?,
            None => ConservedField::zeros(regime, config.point_counts),
        };

        // 3. Grid over the interior
        let grid = GridGeometry::resolve(
            &config.geometry,
            state.conserved.interior_shape(),
            config.effective_spacing(),
        )?;
        debug!(min_width = grid.min_width(), "grid constructed");

        // 4. Ghost cells
        let manager = config.ghost_manager();
        let layout = if from_checkpoint {
            let layout = state.conserved.ghosts();
            pad_field(&mut sources, layout);
            debug!(layout = %layout, "checkpoint is already padded");
            layout
        } else {
            manager.pad(&mut state.conserved, state.lorentz.as_mut(), Some(&mut sources))?
        };

        // 5. Variant
        let variant = SolverVariant::select(dims, regime);
        info!(
            variant = %variant,
            shape = %state.conserved.shape(),
            ghosts = %layout,
            t0 = start_time,
            t1 = config.end_time,
            "invoking engine"
        );

        // 6. Engine
        let input = EngineInput {
            conserved: &state.conserved,
            lorentz: state.lorentz.as_ref(),
            sources: &sources,
            grid: &grid,
            gas,
            cfl_number: config.cfl_number,
            order: config.order,
            riemann_scheme: config.riemann_scheme,
            coordinate_system: config.coordinate_system,
            boundary: config.boundary,
            start_time,
            end_time: config.end_time,
            time_step: config.time_step,
        };
        let mut evolved = variant.invoke(&mut self.engine, &input)?;

        // 7. Post-processing
        check_evolved(&state.conserved, &evolved)?;
        evolved.set_ghosts(layout)?;
        manager.strip(&mut evolved, None)?;

        info!(shape = %evolved.shape(), time = config.end_time, "simulation finished");

        Ok(SimulationOutput {
            conserved: evolved,
            grid,
            variant,
            gas,
            time: config.end_time,
        })
    }
}

/// Check a built or resumed state against the configuration and fill in
/// missing Lorentz factors.
fn complete_state(
    config: &SimulationConfig,
    gas: IdealGas,
    state: &mut ConservedState,
) -> Result<()> {
    if state.regime() != config.regime {
        return Err(SetupError::invalid(
            "regime",
            state.regime(),
            format!("configured regime is {}", config.regime),
        ));
    }
    state.conserved.validate()?;

    let interior = state.conserved.interior_shape();
    if interior != config.point_counts {
        return Err(SetupError::shape_mismatch(
            "initial state interior",
            config.point_counts,
            interior,
        ));
    }

    match (config.regime, state.lorentz.as_ref()) {
        (Regime::Classical, Some(_)) => {
            return Err(SetupError::invalid(
                "lorentz",
                "present",
                "classical states carry no Lorentz factors",
            ));
        }
        (Regime::Relativistic, None) => {
            debug!("deriving Lorentz factors from the conserved field");
            state.lorentz = Some(LorentzFactorField::from_conserved(&state.conserved, gas)?);
        }
        (Regime::Relativistic, Some(w)) => check_companion(&state.conserved, w)?,
        (Regime::Classical, None) => {}
    }
    Ok(())
}

fn check_evolved(input: &ConservedField, output: &ConservedField) -> Result<()> {
    if output.shape() != input.shape() || output.regime() != input.regime() {
        return Err(EngineError::ShapeMismatch {
            expected: format!("{} field of {}", input.regime(), input.shape()),
            actual: format!("{} field of {}", output.regime(), output.shape()),
        }
        .into());
    }
    if output.data().len() != input.data().len() {
        return Err(EngineError::ShapeMismatch {
            expected: format!("{} values", input.data().len()),
            actual: format!("{} values", output.data().len()),
        }
        .into());
    }
    if let Some(cell) = (0..output.n_cells()).find(|&c| !output.cell(c).is_finite()) {
        return Err(EngineError::NonFinite { cell }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Geometry;
    use crate::types::{BoundaryMode, GridShape, Interval, Order};

    /// Engine that returns its input untouched.
    struct Identity;

    impl IntegrationEngine for Identity {
        fn name(&self) -> &'static str {
            "identity"
        }

        fn classical_1d(
            &mut self,
            input: &EngineInput<'_>,
        ) -> std::result::Result<ConservedField, EngineError> {
            Ok(input.conserved.clone())
        }

        fn relativistic_1d(
            &mut self,
            input: &EngineInput<'_>,
        ) -> std::result::Result<ConservedField, EngineError> {
            Ok(input.conserved.clone())
        }

        fn classical_2d(
            &mut self,
            input: &EngineInput<'_>,
        ) -> std::result::Result<ConservedField, EngineError> {
            Ok(input.conserved.clone())
        }

        fn relativistic_2d(
            &mut self,
            input: &EngineInput<'_>,
        ) -> std::result::Result<ConservedField, EngineError> {
            Ok(input.conserved.clone())
        }
    }

    fn config(n: usize) -> SimulationConfig {
        SimulationConfig::new(
            1.4,
            Geometry::one_d(Interval::unit()),
            GridShape::one_d(n).unwrap(),
        )
    }

    fn classical_state(primitive: &PrimitiveState) -> crate::state::ConservedState {
        crate::state::ConservedStateBuilder::new(IdealGas::new(1.4).unwrap(), Regime::Classical)
            .build(primitive)
            .unwrap()
    }

    #[test]
    fn test_identity_run_returns_interior() {
        let mut sim = Simulation::new(Identity, config(50).with_order(Order::Second));
        let output = sim.run(RiemannProblem::sod()).unwrap();

        assert_eq!(output.conserved.shape(), GridShape::OneD(50));
        assert!(output.conserved.ghosts().is_none());
        assert_eq!(output.grid.shape(), GridShape::OneD(50));
        assert_eq!(output.variant, SolverVariant::Classical1D);
        assert_eq!(output.time, 0.1);

        let prim = output.primitives().unwrap();
        assert!((prim.density()[0] - 1.0).abs() < 1e-12);
        assert!((prim.density()[49] - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_resume_derives_lorentz_factors() {
        let gas = IdealGas::radiation();
        let primitive = PrimitiveState::one_d(vec![1.0; 8], vec![1.0; 8], vec![0.6; 8]).unwrap();
        let mut state = crate::state::ConservedStateBuilder::new(gas, Regime::Relativistic)
            .build(&primitive)
            .unwrap();
        state.lorentz = None;

        let mut cfg = config(8)
            .with_regime(Regime::Relativistic)
            .with_boundary(BoundaryMode::Periodic);
        cfg.gamma = gas.gamma;

        let output = Simulation::new(Identity, cfg)
            .run(StartFrom::Resume { state, time: 0.05 })
            .unwrap();
        assert_eq!(output.variant, SolverVariant::Relativistic1D);

        let prim = output.primitives().unwrap();
        assert!((prim.velocity_1()[3] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_hot_ultra_relativistic_state_recovers() {
        // W ~ 224 blast-wave interior
        let gas = IdealGas::radiation();
        let primitive =
            PrimitiveState::one_d(vec![1.0; 6], vec![1000.0; 6], vec![0.99999; 6]).unwrap();
        let mut cfg = config(6).with_regime(Regime::Relativistic);
        cfg.gamma = gas.gamma;

        let fresh = Simulation::new(Identity, cfg.clone()).run(primitive.clone()).unwrap();
        let prim = fresh.primitives().unwrap();
        assert!((prim.pressure()[0] - 1000.0).abs() < 1e-6);

        let mut state = crate::state::ConservedStateBuilder::new(gas, Regime::Relativistic)
            .build(&primitive)
            .unwrap();
        state.lorentz = None;
        let resumed = Simulation::new(Identity, cfg)
            .run(StartFrom::Resume { state, time: 0.0 })
            .unwrap();
        let prim = resumed.primitives().unwrap();
        for c in 0..6 {
            assert!((prim.velocity_1()[c] - 0.99999).abs() < 1e-9);
            assert!((prim.density()[c] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_finite_engine_output_rejected() {
        let primitive = PrimitiveState::one_d(vec![1.0; 4], vec![1.0; 4], vec![0.0; 4]).unwrap();
        let mut state = classical_state(&primitive);
        state.conserved.variable_mut(2)[3] = f64::NAN;
        assert!(matches!(
            check_evolved(&classical_state(&primitive).conserved, &state.conserved),
            Err(SetupError::Engine(EngineError::NonFinite { cell: 3 }))
        ));
    }

    #[test]
    fn test_resume_past_end_time_rejected() {
        let primitive = PrimitiveState::one_d(vec![1.0; 4], vec![1.0; 4], vec![0.0; 4]).unwrap();
        let state = classical_state(&primitive);
        let err = Simulation::new(Identity, config(4))
            .run(StartFrom::Resume { state, time: 1.0 })
            .unwrap_err();
        assert!(matches!(err, SetupError::InvalidParameter { name: "end_time", .. }));
    }

    #[test]
    fn test_regime_mismatch_rejected() {
        let primitive = PrimitiveState::one_d(vec![1.0; 4], vec![1.0; 4], vec![0.0; 4]).unwrap();
        let state = classical_state(&primitive);
        let err = Simulation::new(Identity, config(4).with_regime(Regime::Relativistic))
            .run(state)
            .unwrap_err();
        assert!(matches!(err, SetupError::InvalidParameter { name: "regime", .. }));
    }
}
