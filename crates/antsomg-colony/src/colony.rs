use std::collections::BTreeMap;

use tracing::{debug, info};

use antsomg_core::config::{AppConfig, ColonyConfig};
use antsomg_core::error::{AntsError, Result};
use antsomg_core::{Graph, RandomSource, RngSource};

use crate::aim::Aim;
use crate::ant::{Ant, Trace};

/// Outcome of [`Colony::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColonyReport {
    /// Navigation cycles executed.
    pub cycles: usize,
    /// Ants that met the aim.
    pub completed: usize,
    /// Population size.
    pub ants: usize,
    /// Whether every ant completed before the cycle bound.
    pub aim_achieved: bool,
}

impl std::fmt::Display for ColonyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ants completed after {} cycles (aim {})",
            self.completed,
            self.ants,
            self.cycles,
            if self.aim_achieved { "achieved" } else { "not achieved" }
        )
    }
}

/// Drives a population of ants across several independent graph dimensions.
///
/// Each cycle is strictly phased: every active ant moves once in every
/// dimension, then all trails evaporate once.
pub struct Colony {
    graphs: BTreeMap<String, Graph>,
    ants: Vec<Ant>,
    config: ColonyConfig,
    rng: Box<dyn RandomSource + Send>,
    aim: Box<dyn Aim>,
    cycles: usize,
}

impl Colony {
    /// Create an empty colony; add graphs, then call [`Colony::init_population`].
    pub fn new(config: ColonyConfig, aim: impl Aim + 'static) -> Self {
        let rng = RngSource::from_optional_seed(config.seed);
        Self {
            graphs: BTreeMap::new(),
            ants: Vec::new(),
            config,
            rng: Box::new(rng),
            aim: Box::new(aim),
            cycles: 0,
        }
    }

    /// Build every configured graph and place the population at the starts.
    pub fn from_config(config: &AppConfig, aim: impl Aim + 'static) -> Result<Self> {
        config.colony.validate()?;
        if config.graphs.is_empty() {
            return Err(AntsError::Config("no graphs configured".into()));
        }
        let mut colony = Self::new(config.colony.clone(), aim);
        for graph in &config.graphs {
            colony.add_graph(graph.name.clone(), graph.build()?)?;
        }
        colony.init_population()?;
        Ok(colony)
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Register a graph dimension. The graph must have a start vertex.
    pub fn add_graph(&mut self, name: impl Into<String>, graph: Graph) -> Result<()> {
        let name = name.into();
        graph.start()?;
        if self.graphs.contains_key(&name) {
            return Err(AntsError::Config(format!("duplicate graph name: {}", name)));
        }
        self.graphs.insert(name, graph);
        Ok(())
    }

    pub fn graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    /// Graphs in dimension-name order.
    pub fn graphs(&self) -> impl Iterator<Item = (&str, &Graph)> {
        self.graphs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// The trace every ant starts from.
    pub fn start_trace(&self) -> Result<Trace> {
        self.graphs
            .iter()
            .map(|(name, graph)| Ok((name.clone(), graph.start()?)))
            .collect()
    }

    /// (Re)create `population` ants at the start trace.
    pub fn init_population(&mut self) -> Result<()> {
        let start = self.start_trace()?;
        self.ants = (0..self.config.population)
            .map(|_| Ant::new(start.clone()))
            .collect();
        debug!(population = self.ants.len(), "Population initialised");
        Ok(())
    }

    /// One cycle: move phase over every active ant, then a single decay phase.
    ///
    /// Each ant selects its edge in every dimension before any trail is
    /// reinforced. If a selection fails, that ant leaves no deposit and does
    /// not advance, though ants moved earlier in the cycle keep theirs.
    pub fn navigate(&mut self) -> Result<()> {
        let start = self.start_trace()?;
        let deposit = self.config.pheromone_deposit;
        let explore = self.config.explore_chance;

        for ant in self.ants.iter_mut().filter(|a| !a.is_completed()) {
            let mut staged = Vec::with_capacity(self.graphs.len());
            for (name, graph) in self.graphs.iter() {
                let at = ant.current().dimension(name).ok_or_else(|| {
                    AntsError::UnknownVertex(format!("ant has no position in graph {}", name))
                })?;
                let mv = graph.select_move(at, explore, &mut *self.rng)?;
                staged.push((name.clone(), mv.selected(), graph.edge(mv.selected())?.to()));
            }

            let mut next = Trace::new();
            for (name, selected, to) in staged {
                if let Some(graph) = self.graphs.get_mut(&name) {
                    graph.deposit(selected, deposit)?;
                }
                next.set(name, to);
            }
            ant.advance(next);
            if self.aim.is_complete(ant, &start) {
                ant.complete();
            }
        }

        self.evaporate()?;
        self.cycles += 1;
        debug!(
            cycle = self.cycles,
            completed = self.completed(),
            "Cycle finished"
        );
        Ok(())
    }

    /// Decay every trail of every graph once.
    pub fn evaporate(&mut self) -> Result<()> {
        for graph in self.graphs.values_mut() {
            graph.evaporate_all(self.config.evaporate_rate)?;
        }
        Ok(())
    }

    pub fn completed(&self) -> usize {
        self.ants.iter().filter(|a| a.is_completed()).count()
    }

    pub fn is_aim_achieved(&self) -> bool {
        self.ants.iter().all(Ant::is_completed)
    }

    /// Navigate until every ant completes or `max_cycles` is reached.
    pub fn run(&mut self) -> Result<ColonyReport> {
        while !self.is_aim_achieved() && self.cycles < self.config.max_cycles {
            self.navigate()?;
        }
        let report = ColonyReport {
            cycles: self.cycles,
            completed: self.completed(),
            ants: self.ants.len(),
            aim_achieved: self.is_aim_achieved(),
        };
        info!(
            cycles = report.cycles,
            completed = report.completed,
            ants = report.ants,
            aim_achieved = report.aim_achieved,
            "Colony run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aim::{ReturnToStart, StepLimit};
    use antsomg_test_utils::{minimal_config_toml, spiral_x, spiral_y, ScriptedSource};

    fn config(population: usize) -> ColonyConfig {
        ColonyConfig {
            population,
            seed: Some(11),
            ..ColonyConfig::default()
        }
    }

    fn spiral_colony(population: usize, aim: impl Aim + 'static) -> Colony {
        let mut colony = Colony::new(config(population), aim);
        colony.add_graph("x", spiral_x(1.0, 1.0)).unwrap();
        colony.add_graph("y", spiral_y(1.0, 1.0)).unwrap();
        colony.init_population().unwrap();
        colony
    }

    #[test]
    fn test_init_population_at_starts() {
        let colony = spiral_colony(4, ReturnToStart);
        assert_eq!(colony.ants().len(), 4);
        let x = colony.graph("x").unwrap();
        for ant in colony.ants() {
            assert_eq!(ant.current().dimension("x"), Some(x.start().unwrap()));
            assert_eq!(ant.current().len(), 2);
        }
    }

    #[test]
    fn test_add_graph_requires_start_and_unique_name() {
        let mut colony = Colony::new(config(1), ReturnToStart);
        let mut no_start = Graph::new(1.0, 1.0);
        no_start.add_edge("A", "B", 1.0).unwrap();
        assert!(matches!(
            colony.add_graph("a", no_start),
            Err(AntsError::MissingStart)
        ));
        colony.add_graph("x", spiral_x(1.0, 1.0)).unwrap();
        assert!(colony.add_graph("x", spiral_x(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_navigate_moves_every_dimension_then_evaporates() {
        let mut colony = spiral_colony(1, StepLimit(10)).with_rng(ScriptedSource::new());
        colony.navigate().unwrap();

        // Scripted source exploits at threshold 0: first candidate in both graphs.
        let ant = &colony.ants()[0];
        let x = colony.graph("x").unwrap();
        let y = colony.graph("y").unwrap();
        assert_eq!(ant.current().dimension("x"), x.find_vertex("IN"));
        assert_eq!(ant.current().dimension("y"), y.find_vertex("WHITE"));

        // deposit 0.5, then one evaporation at 0.05
        let expected = 0.5 * 0.95;
        assert!((x.edges()[0].pheromone_trail() - expected).abs() < 1e-12);
        assert!((y.edges()[0].pheromone_trail() - expected).abs() < 1e-12);
        assert!((x.total_pheromone() - expected).abs() < 1e-12);
        assert_eq!(colony.cycles(), 1);
    }

    #[test]
    fn test_completed_ants_stop_moving() {
        let mut colony = spiral_colony(3, StepLimit(1));
        colony.navigate().unwrap();
        assert!(colony.is_aim_achieved());
        let before = colony.graph("x").unwrap().total_pheromone();
        colony.navigate().unwrap();
        let after = colony.graph("x").unwrap().total_pheromone();
        // Only evaporation happened.
        assert!((after - before * 0.95).abs() < 1e-12);
        assert!(colony.ants().iter().all(|a| a.steps() == 1));
    }

    #[test]
    fn test_run_reaches_aim() {
        let mut colony = spiral_colony(20, ReturnToStart);
        let report = colony.run().unwrap();
        assert!(report.aim_achieved);
        assert_eq!(report.completed, 20);
        assert_eq!(report.ants, 20);
        assert!(report.cycles >= 1);
        for ant in colony.ants() {
            assert_eq!(ant.current(), &colony.start_trace().unwrap());
        }
    }

    #[test]
    fn test_run_stops_at_max_cycles() {
        let mut cfg = config(2);
        cfg.max_cycles = 3;
        let mut colony = Colony::new(cfg, |_: &Ant, _: &Trace| false);
        colony.add_graph("x", spiral_x(1.0, 1.0)).unwrap();
        colony.init_population().unwrap();
        let report = colony.run().unwrap();
        assert_eq!(report.cycles, 3);
        assert!(!report.aim_achieved);
        assert_eq!(report.completed, 0);
        assert!(report.to_string().contains("not achieved"));
    }

    #[test]
    fn test_dead_end_propagates() {
        let mut g = Graph::new(1.0, 1.0);
        g.add_edges([("A", "B", 1.0)]).unwrap();
        g.set_start("A").unwrap();
        let mut colony = Colony::new(config(1), StepLimit(5));
        colony.add_graph("g", g).unwrap();
        colony.init_population().unwrap();
        colony.navigate().unwrap();
        assert!(matches!(
            colony.navigate(),
            Err(AntsError::DeadEnd { .. })
        ));
    }

    #[test]
    fn test_failed_dimension_leaves_other_trails() {
        let mut looping = Graph::new(1.0, 1.0);
        looping.add_edge("A", "A", 1.0).unwrap();
        looping.set_start("A").unwrap();
        let mut ending = Graph::new(1.0, 1.0);
        ending.add_edge("A", "B", 1.0).unwrap();
        ending.set_start("A").unwrap();

        let mut colony = Colony::new(config(1), StepLimit(5)).with_rng(ScriptedSource::new());
        colony.add_graph("a", looping).unwrap();
        colony.add_graph("b", ending).unwrap();
        colony.init_population().unwrap();
        colony.navigate().unwrap();
        let before = colony.graph("a").unwrap().total_pheromone();

        // "a" selects first and succeeds, "b" is stuck at B.
        assert!(matches!(
            colony.navigate(),
            Err(AntsError::DeadEnd { .. })
        ));
        assert_eq!(colony.graph("a").unwrap().total_pheromone(), before);
        assert_eq!(colony.ants()[0].steps(), 1);
        assert_eq!(colony.cycles(), 1);
    }

    #[test]
    fn test_from_config() {
        let config: AppConfig = toml::from_str(minimal_config_toml()).unwrap();
        let colony = Colony::from_config(&config, ReturnToStart).unwrap();
        assert_eq!(colony.ants().len(), 5);
        let names: Vec<&str> = colony.graphs().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);

        let empty = AppConfig::default();
        assert!(matches!(
            Colony::from_config(&empty, ReturnToStart),
            Err(AntsError::Config(_))
        ));
    }
}
