use rayon::prelude::*;

/// Splits `data` into one chunk per CPU, applies `f` to the chunks in parallel, and yields the
/// concatenated results. Results from different chunks arrive in no particular order.
pub(crate) fn par_chunks<T, F, R>(data: &[T], f: F) -> impl Iterator<Item = R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> Vec<R> + Sync,
{
    let (s, r) = crossbeam_channel::unbounded();
    let chunk_size = std::cmp::max(data.len() / num_cpus::get(), 1);
    data.chunks(chunk_size)
        .par_bridge()
        .for_each_with(s, |s, chunk| {
            s.send(f(chunk)).unwrap(); // channel will not become disconnected
        });
    r.into_iter().flatten()
}
