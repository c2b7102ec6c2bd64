//! 评价轮播定时器
//!
//! Advances the shared testimonial carousel on a fixed interval while
//! auto-play is on. Manual navigation turns auto-play off; the rotator then
//! stops ticking and parks until shutdown.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::carousel::Carousel;
use shared::models::TESTIMONIALS;
use tokio_util::sync::CancellationToken;

pub type SharedCarousel = Arc<Mutex<Carousel>>;

/// Carousel over the built-in testimonials
pub fn testimonial_carousel() -> SharedCarousel {
    Arc::new(Mutex::new(Carousel::over(&TESTIMONIALS)))
}

pub struct TestimonialRotator {
    carousel: SharedCarousel,
    interval: Duration,
    shutdown: CancellationToken,
}

impl TestimonialRotator {
    pub fn new(carousel: SharedCarousel, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            carousel,
            interval,
            shutdown,
        }
    }

    pub async fn run(self) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Testimonial rotator started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    // No tick once shutdown has been requested
                    if self.shutdown.is_cancelled() {
                        return;
                    }
                    let (ticked, index) = {
                        let mut carousel = self.carousel.lock();
                        (carousel.tick(), carousel.index())
                    };
                    if !ticked {
                        tracing::debug!(index, "Auto-play off, rotator idle");
                        break;
                    }
                    tracing::trace!(index, "Testimonial advanced");
                }
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("Testimonial rotator received shutdown signal");
                    return;
                }
            }
        }

        self.shutdown.cancelled().await;
    }
}
