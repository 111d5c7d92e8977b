//! Background weather lookups
//!
//! Each lookup runs on its own tokio task and reports back to the UI loop over
//! an mpsc channel, so the terminal keeps redrawing while a request is in
//! flight. Outcomes carry the generation of the request that produced them.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::data::{WeatherClient, WeatherError, WeatherRecord};

/// Capacity of the outcome channel
const CHANNEL_CAPACITY: usize = 16;

/// A lookup the view controller wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Generation of the submission that issued this request
    pub generation: u64,
    /// City to search for, already trimmed
    pub city: String,
    /// Pause before the request is sent
    pub delay: Duration,
}

/// Result of a finished lookup
#[derive(Debug)]
pub struct LookupOutcome {
    /// Generation copied from the originating request
    pub generation: u64,
    /// City that was searched
    pub city: String,
    /// Record or the reason the lookup failed
    pub result: Result<WeatherRecord, WeatherError>,
}

/// Spawns lookups and collects their outcomes
pub struct LookupDispatcher {
    client: WeatherClient,
    sender: mpsc::Sender<LookupOutcome>,
    /// Channel for receiving finished lookups
    pub receiver: mpsc::Receiver<LookupOutcome>,
}

impl LookupDispatcher {
    /// Creates a dispatcher that sends requests through `client`
    pub fn new(client: WeatherClient) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            client,
            sender,
            receiver,
        }
    }

    /// Spawns a task performing the lookup
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, request: LookupRequest) {
        let client = self.client.clone();
        let sender = self.sender.clone();

        debug!(
            generation = request.generation,
            city = %request.city,
            "dispatching lookup"
        );

        tokio::spawn(async move {
            if !request.delay.is_zero() {
                tokio::time::sleep(request.delay).await;
            }

            let result = client.fetch_weather(&request.city).await;
            let outcome = LookupOutcome {
                generation: request.generation,
                city: request.city,
                result,
            };

            if sender.send(outcome).await.is_err() {
                warn!("lookup finished after the receiver was dropped");
            }
        });
    }

    /// Waits for the next finished lookup
    pub async fn recv(&mut self) -> Option<LookupOutcome> {
        self.receiver.recv().await
    }
}

/// Checks for a finished lookup without blocking
///
/// # Returns
/// * `Some(LookupOutcome)` if a lookup has finished
/// * `None` if nothing is pending
pub fn try_recv(dispatcher: &mut LookupDispatcher) -> Option<LookupOutcome> {
    dispatcher.receiver.try_recv().ok()
}
