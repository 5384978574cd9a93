//! Background raster scheduling.
//!
//! One worker thread per scheduler (one scheduler per gradient-display
//! instance). Every request supersedes the previous one: the worker drops
//! jobs whose generation is no longer the latest before computing, and
//! re-checks before publishing. Publishes are totally ordered by the
//! single worker, so a stale result can never land after a newer one.
//!
//! The interactive thread never blocks here; during a drag the host shows
//! [`RenderScheduler::live_preview`] while the debounced high-quality
//! raster catches up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use aurora_gradient::model::{NodeId, SpaceGradient};

use crate::cache::{RenderCache, RenderKey};
use crate::raster::{self, Bitmap, RasterParams};

/// Per-request context supplied by the host.
///
/// Explicitly passed rather than read from shared observable state, so the
/// renderer is pure given its inputs.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderCtx {
    /// Host is animating a space transition.
    pub is_animating: bool,
    /// Host is inside an interactive edit drag.
    pub is_editing: bool,
    /// Primary hint, honored by ≤2-node primary selection.
    pub preferred_primary: Option<NodeId>,
}

impl RenderCtx {
    /// Dithering is traded away for responsiveness during continuous
    /// updates.
    #[inline]
    pub fn allow_dithering(&self) -> bool {
        !(self.is_animating || self.is_editing)
    }
}

struct Job {
    generation: u64,
    gradient: SpaceGradient,
    params: RasterParams,
    key: RenderKey,
}

type PublishFn = dyn Fn(RenderKey, Arc<Bitmap>) + Send + 'static;

/// Debounced background rasterizer for one display surface.
///
/// Requests carry an immutable gradient snapshot; the worker never sees
/// the live model. Replacing the latest generation *is* the cancellation
/// mechanism; no partial buffers exist to clean up.
pub struct RenderScheduler {
    tx: Option<mpsc::Sender<Job>>,
    latest: Arc<AtomicU64>,
    cache: Arc<RenderCache>,
    worker: Option<thread::JoinHandle<()>>,
}

impl RenderScheduler {
    /// Spawns the worker with a default-capacity cache.
    ///
    /// `publish` runs on the worker thread with the finished bitmap; hosts
    /// typically forward it to their display surface.
    pub fn new(publish: impl Fn(RenderKey, Arc<Bitmap>) + Send + 'static) -> Self {
        Self::with_cache(Arc::new(RenderCache::default()), publish)
    }

    pub fn with_cache(
        cache: Arc<RenderCache>,
        publish: impl Fn(RenderKey, Arc<Bitmap>) + Send + 'static,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let latest = Arc::new(AtomicU64::new(0));

        let worker = {
            let latest = Arc::clone(&latest);
            let cache = Arc::clone(&cache);
            thread::spawn(move || worker_loop(rx, latest, cache, Box::new(publish)))
        };

        Self {
            tx: Some(tx),
            latest,
            cache,
            worker: Some(worker),
        }
    }

    /// Schedules a raster for `gradient` at `width` × `height`.
    ///
    /// Supersedes any in-flight or queued request. Returns the request's
    /// generation (mostly useful in tests and logs).
    pub fn request(
        &self,
        gradient: &SpaceGradient,
        width: u32,
        height: u32,
        ctx: &RenderCtx,
    ) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let mut params = RasterParams::new(width, height);
        params.allow_dithering = ctx.allow_dithering();

        let job = Job {
            generation,
            gradient: gradient.clone(),
            key: RenderKey::for_request(gradient, width, height, params.allow_dithering),
            params,
        };

        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                log::warn!("render worker is gone; request {generation} dropped");
            }
        }
        generation
    }

    /// Cheap synchronous strip for live preview during drags.
    ///
    /// No per-pixel dither loop; safe to call on the interactive thread at
    /// input rate.
    pub fn live_preview(&self, gradient: &SpaceGradient) -> Bitmap {
        raster::linear_fallback(gradient)
    }

    #[inline]
    pub fn cache(&self) -> &Arc<RenderCache> {
        &self.cache
    }

    /// Closes the channel and waits for the worker to drain and exit.
    ///
    /// For hosts (and tests) that need deterministic teardown, e.g. to be
    /// sure every pending publish has run. Interactive teardown should
    /// just drop the scheduler, which detaches the worker instead of
    /// blocking on it.
    pub fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("render worker panicked");
            }
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        // Invalidate anything still queued or in flight, then close the
        // channel and detach. The worker skips superseded generations and
        // exits on its own; the interactive thread never waits for a
        // raster to finish.
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.tx.take();
        self.worker.take();
    }
}

fn worker_loop(
    rx: mpsc::Receiver<Job>,
    latest: Arc<AtomicU64>,
    cache: Arc<RenderCache>,
    publish: Box<PublishFn>,
) {
    while let Ok(mut job) = rx.recv() {
        // Debounce: a queued newer job supersedes this one outright.
        while let Ok(next) = rx.try_recv() {
            job = next;
        }
        if job.generation != latest.load(Ordering::SeqCst) {
            log::debug!("raster generation {} superseded before compute", job.generation);
            continue;
        }

        if let Some(hit) = cache.get(&job.key) {
            log::debug!("cache hit for {:?}", job.key);
            publish(job.key, hit);
            continue;
        }

        match raster::rasterize(&job.gradient, &job.params) {
            Ok(bitmap) => {
                let bitmap = Arc::new(bitmap);
                cache.insert(job.key, Arc::clone(&bitmap));
                if job.generation == latest.load(Ordering::SeqCst) {
                    publish(job.key, bitmap);
                } else {
                    log::debug!("raster generation {} superseded after compute", job.generation);
                }
            }
            Err(e) => {
                log::warn!("raster job failed, degrading to linear fallback: {e:#}");
                let fallback = Arc::new(raster::linear_fallback(&job.gradient));
                if job.generation == latest.load(Ordering::SeqCst) {
                    publish(job.key, fallback);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_gradient::color::Color;
    use aurora_gradient::model::GradientNode;
    use std::time::Duration;

    fn gradient(grain: f32) -> SpaceGradient {
        let mut g = SpaceGradient::new(vec![
            GradientNode::new(Color::black(), 0.0),
            GradientNode::new(Color::white(), 1.0),
        ]);
        g.set_grain(grain);
        g
    }

    fn collecting_scheduler() -> (RenderScheduler, mpsc::Receiver<(RenderKey, Arc<Bitmap>)>) {
        let (tx, rx) = mpsc::channel();
        let scheduler = RenderScheduler::new(move |key, bmp| {
            let _ = tx.send((key, bmp));
        });
        (scheduler, rx)
    }

    // ── ctx gating ────────────────────────────────────────────────────────

    #[test]
    fn dithering_gated_by_host_signals() {
        assert!(RenderCtx::default().allow_dithering());
        assert!(!RenderCtx { is_animating: true, ..Default::default() }.allow_dithering());
        assert!(!RenderCtx { is_editing: true, ..Default::default() }.allow_dithering());
    }

    // ── publish ───────────────────────────────────────────────────────────

    #[test]
    fn publishes_requested_dimensions() {
        let (scheduler, rx) = collecting_scheduler();
        let g = gradient(0.0);
        scheduler.request(&g, 64, 32, &RenderCtx::default());

        let (key, bmp) = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!((key.width, key.height), (64, 32));
        assert_eq!((bmp.width(), bmp.height()), (64, 32));
    }

    #[test]
    fn latest_request_wins() {
        let (scheduler, rx) = collecting_scheduler();

        let mut final_key = None;
        for i in 0..5 {
            let g = gradient(i as f32 / 5.0);
            scheduler.request(&g, 32, 32, &RenderCtx::default());
            final_key = Some(RenderKey::for_request(&g, 32, 32, true));
        }
        scheduler.shutdown(); // joins the worker; all publishes are in.

        let published: Vec<RenderKey> = rx.try_iter().map(|(k, _)| k).collect();
        assert!(!published.is_empty());
        assert_eq!(published.last().copied(), final_key);
    }

    #[test]
    fn cache_hit_publishes_same_bitmap() {
        let (scheduler, rx) = collecting_scheduler();
        let g = gradient(0.3);

        scheduler.request(&g, 16, 16, &RenderCtx::default());
        let (_, first) = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        scheduler.request(&g, 16, 16, &RenderCtx::default());
        let (_, second) = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(scheduler.cache().len(), 1);
    }

    #[test]
    fn edit_time_raster_does_not_shadow_the_dithered_one() {
        let (scheduler, rx) = collecting_scheduler();
        let g = gradient(1.0);

        // During the drag: dithering off, low-quality raster published.
        let editing = RenderCtx { is_editing: true, ..Default::default() };
        scheduler.request(&g, 32, 32, &editing);
        let (_, during) = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        // After the drag: the same gradient/size must come back dithered,
        // not as a cache hit on the edit-time bitmap.
        scheduler.request(&g, 32, 32, &RenderCtx::default());
        let (_, after) = rx.recv_timeout(Duration::from_secs(10)).unwrap();

        assert_ne!(*after, *during);
        let expected = raster::rasterize(&g, &RasterParams::new(32, 32)).unwrap();
        assert_eq!(*after, expected);
    }

    #[test]
    fn drop_does_not_wait_for_the_worker() {
        use std::sync::Mutex;

        // Publish parks the worker on a gate so a job is provably in
        // flight while the scheduler is dropped.
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let gate_rx = Mutex::new(gate_rx);
        let (out_tx, out_rx) = mpsc::channel();
        let scheduler = RenderScheduler::new(move |key, _| {
            let _ = out_tx.send(key);
            let _ = gate_rx.lock().unwrap().recv();
        });

        scheduler.request(&gradient(0.0), 16, 16, &RenderCtx::default());
        out_rx.recv_timeout(Duration::from_secs(10)).unwrap(); // worker parked

        scheduler.request(&gradient(0.5), 16, 16, &RenderCtx::default());
        drop(scheduler); // must return while the worker is still parked
        gate_tx.send(()).unwrap();

        // The queued job was invalidated at drop; releasing the gate lets
        // the worker skip it and exit without another publish.
        assert!(out_rx.recv_timeout(Duration::from_millis(500)).is_err());
    }

    #[test]
    fn failed_job_degrades_to_fallback_strip() {
        let (scheduler, rx) = collecting_scheduler();
        let g = gradient(0.0);
        scheduler.request(&g, crate::raster::MAX_DIMENSION + 1, 4, &RenderCtx::default());

        let (_, bmp) = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (256, 1));
    }

    #[test]
    fn live_preview_is_synchronous() {
        let (scheduler, _rx) = collecting_scheduler();
        let strip = scheduler.live_preview(&gradient(0.9));
        assert_eq!(strip.height(), 1);
    }
}
