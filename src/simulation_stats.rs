/// Ticks of population history kept for the HUD
pub const HISTORY_LEN: usize = 1000;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimulationStats {
    pub total_births: usize,
    pub total_deaths: usize,
    pub prey_eaten: usize,
    pub max_population: usize,
    /// (prey, predators) per running tick, oldest first
    pub population_history: Vec<(usize, usize)>,
}

impl SimulationStats {
    pub fn new() -> Self {
        SimulationStats {
            population_history: Vec::with_capacity(HISTORY_LEN),
            ..Default::default()
        }
    }

    pub fn record_population(&mut self, prey: usize, predators: usize) {
        self.max_population = self.max_population.max(prey + predators);
        self.population_history.push((prey, predators));
        if self.population_history.len() > HISTORY_LEN {
            self.population_history.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let mut stats = SimulationStats::new();
        for i in 0..HISTORY_LEN + 10 {
            stats.record_population(i, 1);
        }
        assert_eq!(stats.population_history.len(), HISTORY_LEN);
        assert_eq!(stats.population_history[0], (10, 1));
        assert_eq!(stats.max_population, HISTORY_LEN + 10);
    }
}
