use super::engine::ProgressCallback;

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_profile: &str, best_transition: &str) {
        println!(
            "Generation {} complete. Best profile: {}, best transition: {}",
            generation + 1,
            best_profile,
            best_transition
        );
    }
}
