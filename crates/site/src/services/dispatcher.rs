//! Dual-send dispatcher for contact submissions.
//!
//! One submission becomes two EmailJS sends issued concurrently: the
//! confirmation to the submitter and the lead notification to the owner.
//! The dispatch succeeds only if both sends succeed. The first failure wins
//! and the caller is not told which copy failed.

use std::time::Duration;

use gvs_controls_core::{Email, Recipient, SubmissionAttempt};
use thiserror::Error;
use tracing::instrument;

use crate::config::ProviderIds;
use crate::services::emailjs::{EmailJsClient, EmailJsError};

/// Errors from a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// One of the two sends failed.
    #[error("{recipient} send failed: {source}")]
    Send {
        recipient: &'static str,
        #[source]
        source: EmailJsError,
    },

    /// The sends did not complete in time.
    #[error("sends did not complete within {0:?}")]
    TimedOut(Duration),
}

/// Sends both copies of a submission.
#[derive(Clone)]
pub struct InquiryDispatcher {
    client: EmailJsClient,
    owner: Email,
    timeout: Duration,
}

impl InquiryDispatcher {
    #[must_use]
    pub const fn new(client: EmailJsClient, owner: Email, timeout: Duration) -> Self {
        Self {
            client,
            owner,
            timeout,
        }
    }

    /// The fixed inbox that receives the owner copy.
    #[must_use]
    pub const fn owner(&self) -> &Email {
        &self.owner
    }

    /// Send the customer and owner copies concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first send failure, or [`DispatchError::TimedOut`] if the
    /// pair has not completed within the configured timeout. A send still in
    /// flight when the other fails is dropped.
    #[instrument(skip_all, fields(from_email = %attempt.from_email()))]
    pub async fn dispatch(
        &self,
        ids: &ProviderIds,
        attempt: &SubmissionAttempt,
    ) -> Result<(), DispatchError> {
        let customer = self.send_copy(ids, attempt, Recipient::Customer);
        let owner = self.send_copy(ids, attempt, Recipient::Owner);

        match tokio::time::timeout(self.timeout, async { tokio::try_join!(customer, owner) })
            .await
        {
            Ok(Ok(((), ()))) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DispatchError::TimedOut(self.timeout)),
        }
    }

    async fn send_copy(
        &self,
        ids: &ProviderIds,
        attempt: &SubmissionAttempt,
        recipient: Recipient,
    ) -> Result<(), DispatchError> {
        let template_id = match recipient {
            Recipient::Customer => &ids.customer_template_id,
            Recipient::Owner => &ids.owner_template_id,
        };
        let params = attempt.params_for(recipient, &self.owner);

        self.client
            .send(&ids.service_id, template_id, &params)
            .await
            .map_err(|source| DispatchError::Send {
                recipient: recipient.as_str(),
                source,
            })
    }
}
