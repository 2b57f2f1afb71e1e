// Building the per-run random source.
//
// A seeded run hashes the seed text into the generator's state, so the same
// seed always yields the same melody. An unseeded run still uses `SeedRng`,
// just with its state drawn from OS entropy via `rand`.

use seedsong_prng::SeedRng;

/// Create the single random source a generation run will own.
pub fn source_for(seed: Option<&str>) -> SeedRng {
    match seed {
        Some(text) => SeedRng::from_text(text),
        None => SeedRng::new(rand::random::<u32>()),
    }
}
