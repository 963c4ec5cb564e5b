//! Bulk submission planning

use ace_core::GenerationParams;
use rand::Rng;
use std::collections::HashSet;

/// Expand one request into the parameters of `count` independent jobs.
///
/// With more than one job, titles get a 1-based ` (i)` suffix. When the
/// caller asked for a fixed seed (`random_seed == false`), only the first
/// job keeps it; every later job is switched to a fresh random seed so a
/// batch never yields identical outputs. Fresh seeds are distinct from
/// each other and from the caller's seed.
pub fn plan_batch(params: &GenerationParams, count: u32) -> Vec<GenerationParams> {
    plan_batch_with(params, count, &mut rand::thread_rng())
}

pub(crate) fn plan_batch_with<R: Rng>(
    params: &GenerationParams,
    count: u32,
    rng: &mut R,
) -> Vec<GenerationParams> {
    let fixed_seed = !params.random_seed;
    let mut used: HashSet<i64> = params.seed.into_iter().collect();

    (0..count)
        .map(|i| {
            let mut job = params.clone();

            if count > 1 {
                job.title = format!("{} ({})", params.title, i + 1);
            }

            if fixed_seed && i > 0 {
                job.random_seed = true;
                job.seed = Some(fresh_seed(rng, &mut used));
            } else if !fixed_seed {
                job.seed = None;
            }

            job
        })
        .collect()
}

fn fresh_seed<R: Rng>(rng: &mut R, used: &mut HashSet<i64>) -> i64 {
    loop {
        let seed = i64::from(rng.gen::<u32>());
        if used.insert(seed) {
            return seed;
        }
    }
}
