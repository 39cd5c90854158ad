//! Fan-out of pending requests and reduction into receipts.
//!
//! Every request of every wallet becomes its own future. All futures are built
//! up front and driven together by a single `join_all`, so a slow or failing
//! request never holds back or aborts the others.

use crate::{ContextBuilder, PendingLogSink, WalletContext};
use futures::future::{self, join_all, Either};
use relay_delivery::{RequestSubmitter, SubmissionOutcome};
use relay_types::{truncate_id, PendingRequest, ProviderSnapshot, Receipt};
use std::sync::Arc;
use tracing::instrument;

/// Error reported when a submitter neither failed nor returned data.
const NO_DATA_ERROR: &str = "no transaction data returned";

/// Submits every pending request of a snapshot as an independent transaction.
pub struct TransactionSubmitter {
	contexts: ContextBuilder,
	submitter: Arc<dyn RequestSubmitter>,
	log_sink: Arc<dyn PendingLogSink>,
}

impl TransactionSubmitter {
	pub fn new(
		contexts: ContextBuilder,
		submitter: Arc<dyn RequestSubmitter>,
		log_sink: Arc<dyn PendingLogSink>,
	) -> Self {
		Self {
			contexts,
			submitter,
			log_sink,
		}
	}

	/// Runs one submission pass over `snapshot`.
	///
	/// Returns exactly one receipt per pending request, ordered by wallet
	/// index, then kind (API calls, withdrawals, wallet designations), then
	/// snapshot order. A wallet whose context cannot be built gets a failure
	/// receipt for each of its requests; nothing is submitted for it.
	#[instrument(skip_all, fields(run = %snapshot.name, chain_id = snapshot.chain_id))]
	pub async fn submit(&self, snapshot: &ProviderSnapshot) -> Vec<Receipt> {
		let mut submissions = Vec::with_capacity(snapshot.request_count());

		for (wallet_index, wallet) in &snapshot.wallet_data_by_index {
			if wallet.requests.is_empty() {
				continue;
			}

			match self.contexts.build(wallet_index, snapshot) {
				Ok(context) => {
					if let Some(expected) = wallet.address {
						if expected != context.signer_address {
							tracing::warn!(
								wallet_index = %wallet_index,
								expected = %expected,
								derived = %context.signer_address,
								"Snapshot wallet address does not match derived signer"
							);
						}
					}
					tracing::debug!(
						wallet_index = %wallet_index,
						signer = %context.signer_address,
						requests = wallet.requests.len(),
						"Submitting wallet requests"
					);
					let context = Arc::new(context);
					for request in wallet.requests.pending() {
						submissions.push(Either::Left(self.submit_request(
							context.clone(),
							request,
							&snapshot.name,
						)));
					}
				}
				Err(e) => {
					tracing::error!(
						wallet_index = %wallet_index,
						requests = wallet.requests.len(),
						error = %e,
						"Failed to build submission context"
					);
					let reason = e.to_string();
					for request in wallet.requests.pending() {
						submissions.push(Either::Right(future::ready(Receipt::failure(
							request.id(),
							request.request_type(),
							reason.clone(),
						))));
					}
				}
			}
		}

		let receipts = join_all(submissions).await;

		let failed = receipts.iter().filter(|receipt| !receipt.is_success()).count();
		tracing::info!(
			submitted = receipts.len() - failed,
			failed,
			"Submission pass complete"
		);

		receipts
	}

	async fn submit_request(
		&self,
		context: Arc<WalletContext>,
		request: PendingRequest,
		run_name: &str,
	) -> Receipt {
		tracing::debug!(
			request_id = %truncate_id(request.id()),
			kind = %request.request_type(),
			wallet_index = %context.wallet_index,
			"Submitting request"
		);

		let outcome = self
			.submitter
			.submit(context.contract.as_ref(), &request, &context.options)
			.await;
		self.log_sink.log_pending(run_name, &outcome.logs);

		into_receipt(&request, outcome)
	}
}

/// Maps an outcome onto a receipt carrying exactly one of data or error.
fn into_receipt(request: &PendingRequest, outcome: SubmissionOutcome) -> Receipt {
	match (outcome.error, outcome.data) {
		(Some(error), _) => {
			Receipt::failure(request.id(), request.request_type(), error.to_string())
		}
		(None, Some(data)) => Receipt::success(request.id(), request.request_type(), data),
		(None, None) => Receipt::failure(request.id(), request.request_type(), NO_DATA_ERROR),
	}
}
