//! Sod shock tube through the full setup and dispatch pipeline.
//!
//! A first-order Rusanov engine stands in for a production integrator. It
//! refreshes the zero-gradient ghosts every step and advances the interior
//! under the CFL bound handed over in `EngineInput`.

use rhd_rs::engine::{EngineError, EngineInput, IntegrationEngine};
use rhd_rs::equations::IdealGas;
use rhd_rs::mesh::Geometry;
use rhd_rs::setup::RiemannProblem;
use rhd_rs::simulation::{Simulation, SimulationConfig};
use rhd_rs::state::ConservedField;
use rhd_rs::types::{GridShape, Interval, Order, Regime};
use rhd_rs::SolverVariant;

const N: usize = 200;

/// Local Lax-Friedrichs scheme for the 1D Euler equations.
#[derive(Default)]
struct RusanovEngine {
    steps: usize,
}

fn primitives(u: [f64; 3], gas: IdealGas) -> (f64, f64, f64) {
    let rho = u[0];
    let v = u[1] / rho;
    let p = (gas.gamma - 1.0) * (u[2] - 0.5 * rho * v * v);
    (rho, v, p)
}

fn flux(u: [f64; 3], gas: IdealGas) -> [f64; 3] {
    let (rho, v, p) = primitives(u, gas);
    [rho * v, rho * v * v + p, (u[2] + p) * v]
}

fn signal_speed(u: [f64; 3], gas: IdealGas) -> f64 {
    let (rho, v, p) = primitives(u, gas);
    v.abs() + gas.sound_speed(rho, p)
}

impl IntegrationEngine for RusanovEngine {
    fn name(&self) -> &'static str {
        "rusanov"
    }

    fn classical_1d(&mut self, input: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        let gas = input.gas;
        let mut field = input.conserved.clone();
        let g = field.ghosts().x1;
        let n = field.n_cells();
        let centers = &input.grid.x1().centers;
        let dx = centers[1] - centers[0];
        let mut t = input.start_time;

        while t < input.end_time {
            for var in 0..3 {
                let v = field.variable_mut(var);
                for k in 0..g {
                    v[k] = v[g];
                    v[n - 1 - k] = v[n - 1 - g];
                }
            }

            let cells: Vec<[f64; 3]> = (0..n)
                .map(|i| {
                    let c = field.cell(i);
                    [c.mass, c.momentum_1, c.energy]
                })
                .collect();
            let max_speed = cells
                .iter()
                .map(|u| signal_speed(*u, gas))
                .fold(0.0, f64::max);
            let dt = input.cfl_time_step(max_speed).min(input.end_time - t);

            let faces: Vec<[f64; 3]> = cells
                .windows(2)
                .map(|w| {
                    let (fl, fr) = (flux(w[0], gas), flux(w[1], gas));
                    let a = signal_speed(w[0], gas).max(signal_speed(w[1], gas));
                    [0, 1, 2].map(|k| 0.5 * (fl[k] + fr[k]) - 0.5 * a * (w[1][k] - w[0][k]))
                })
                .collect();

            for var in 0..3 {
                let v = field.variable_mut(var);
                for i in g..n - g {
                    v[i] -= dt / dx * (faces[i][var] - faces[i - 1][var]);
                }
            }

            t += dt;
            self.steps += 1;
        }

        if let Some(k) = field.data().iter().position(|v| !v.is_finite()) {
            return Err(EngineError::NonFinite { cell: k % n });
        }
        Ok(field)
    }

    fn relativistic_1d(&mut self, _: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        Err(EngineError::NonConvergence("relativistic runs not supported".into()))
    }

    fn classical_2d(&mut self, _: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        Err(EngineError::NonConvergence("2D runs not supported".into()))
    }

    fn relativistic_2d(&mut self, _: &EngineInput<'_>) -> Result<ConservedField, EngineError> {
        Err(EngineError::NonConvergence("2D runs not supported".into()))
    }
}

fn sod_config() -> SimulationConfig {
    SimulationConfig::new(
        1.4,
        Geometry::one_d(Interval::unit()),
        GridShape::one_d(N).unwrap(),
    )
}

#[test]
fn test_sod_initial_state_without_evolution() {
    let mut sim = Simulation::new(RusanovEngine::default(), sod_config().with_end_time(0.0));
    let output = sim.run(RiemannProblem::sod()).unwrap();

    assert_eq!(sim.engine().steps, 0);
    assert_eq!(output.conserved.shape(), GridShape::OneD(N));
    assert_eq!(output.variant, SolverVariant::Classical1D);

    let mass = output.conserved.variable(0);
    let energy = output.conserved.variable(2);
    for i in 0..N / 2 {
        assert!((mass[i] - 1.0).abs() < 1e-14);
        assert!((energy[i] - 2.5).abs() < 1e-12);
    }
    for i in N / 2..N {
        assert!((mass[i] - 0.125).abs() < 1e-14);
        assert!((energy[i] - 0.25).abs() < 1e-12);
    }
    assert!(output.conserved.variable(1).iter().all(|m| *m == 0.0));
}

#[test]
fn test_sod_evolution_conserves_mass() {
    let mut sim = Simulation::new(RusanovEngine::default(), sod_config());
    let output = sim.run(RiemannProblem::sod()).unwrap();
    assert!(sim.engine().steps > 0);

    let dx = 1.0 / N as f64;
    let total_mass: f64 = output.conserved.variable(0).iter().sum::<f64>() * dx;
    assert!((total_mass - 0.5625).abs() < 1e-10);

    // Waves have not reached the outer cells by t = 0.1
    let prim = output.primitives().unwrap();
    let rho = prim.density();
    assert!((rho[2] - 1.0).abs() < 1e-10);
    assert!((rho[N - 3] - 0.125).abs() < 1e-10);

    // Gas moves right behind the shock
    assert!(prim.velocity_1()[N / 2 + 10] > 0.1);
    assert!(rho.iter().all(|r| *r > 0.1 && *r < 1.0 + 1e-10));
}

#[test]
fn test_sod_second_order_ghosts_are_transparent() {
    let first = Simulation::new(RusanovEngine::default(), sod_config())
        .run(RiemannProblem::sod())
        .unwrap();
    let second = Simulation::new(
        RusanovEngine::default(),
        sod_config().with_order(Order::Second),
    )
    .run(RiemannProblem::sod())
    .unwrap();

    assert_eq!(first.conserved.shape(), second.conserved.shape());
    for (a, b) in first.conserved.data().iter().zip(second.conserved.data()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_sod_relativistic_reports_engine_error() {
    let mut config = sod_config().with_regime(Regime::Relativistic);
    config.gamma = 5.0 / 3.0;
    let err = Simulation::new(RusanovEngine::default(), config)
        .run(RiemannProblem::sod())
        .unwrap_err();
    assert_eq!(err.kind(), rhd_rs::ErrorKind::Engine);
}
