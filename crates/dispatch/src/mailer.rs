use std::sync::Arc;

use mailroom_aws::{
    DynamoEngagementStore, EngagementTableConfig, SesConfig, SesTransport, SsmConfig,
    SsmParameterStore,
};
use mailroom_core::{DispatchOutcome, EmailMessage, EngagementRecord, Notification};
use mailroom_provider::{EmailTransport, EngagementStore, ProviderError};
use mailroom_sendgrid::{SendGridConfig, SendGridTransport};
use tracing::{info, instrument, warn};

use crate::config::MailerConfig;
use crate::resolver::TemplateResolver;

/// Whether a message body reads like re-engagement mail, which goes out
/// through the marketing provider for deliverability even without a remote
/// template.
///
/// The test is case-sensitive; fallback bodies keep these tokens lowercase.
fn is_reengagement_content(html: &str) -> bool {
    html.contains("inactivity") || html.contains("warning")
}

/// The dispatch orchestrator.
///
/// Owns one transport per provider, the template resolver, and the optional
/// engagement store, and applies the selection and fallback policy to every
/// send. Construct with [`Mailer::new`] for the production backends or
/// [`Mailer::with_parts`] to inject your own.
#[derive(Debug)]
pub struct Mailer {
    marketing: Option<Box<dyn EmailTransport>>,
    transactional: Box<dyn EmailTransport>,
    resolver: TemplateResolver,
    engagement: Option<Arc<dyn EngagementStore>>,
    sender: String,
    app_url: String,
}

impl Mailer {
    /// Create a mailer wired to the production backends: SES for
    /// transactional sends, SendGrid when an API key is configured, SSM for
    /// template resolution, and DynamoDB when an engagement table is
    /// configured.
    pub async fn new(config: MailerConfig) -> Self {
        let transactional: Box<dyn EmailTransport> =
            Box::new(SesTransport::new(SesConfig::new(&config.aws_region)).await);

        let marketing: Option<Box<dyn EmailTransport>> =
            config.sendgrid_api_key.as_deref().map(|key| {
                Box::new(SendGridTransport::new(SendGridConfig::new(key)))
                    as Box<dyn EmailTransport>
            });

        let params = SsmParameterStore::new(SsmConfig::new(&config.aws_region)).await;
        let resolver = TemplateResolver::new(Arc::new(params), &config.environment);

        let engagement: Option<Arc<dyn EngagementStore>> = match &config.engagement_table {
            Some(table) => {
                let store = DynamoEngagementStore::new(EngagementTableConfig::new(
                    table,
                    &config.aws_region,
                ))
                .await;
                Some(Arc::new(store))
            }
            None => None,
        };

        Self::with_parts(
            marketing,
            transactional,
            resolver,
            engagement,
            config.sender,
            config.app_url,
        )
    }

    /// Assemble a mailer from explicit parts.
    pub fn with_parts(
        marketing: Option<Box<dyn EmailTransport>>,
        transactional: Box<dyn EmailTransport>,
        resolver: TemplateResolver,
        engagement: Option<Arc<dyn EngagementStore>>,
        sender: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            marketing,
            transactional,
            resolver,
            engagement,
            sender: sender.into(),
            app_url: app_url.into(),
        }
    }

    /// Send one message through the provider the policy selects.
    ///
    /// The decision sequence is fixed:
    ///
    /// 1. A message carrying a template identifier goes to the marketing
    ///    provider when one is configured. If that send fails and the
    ///    message also carries an HTML body, it falls back to the
    ///    transactional provider; without HTML the marketing error is
    ///    returned to the caller unchanged.
    /// 2. Otherwise, re-engagement content goes to the marketing provider
    ///    when configured. A failure here only logs; the message falls
    ///    through.
    /// 3. Everything else needs a subject and an HTML body and goes to the
    ///    transactional provider. Failure is terminal.
    ///
    /// At most two outbound calls happen per send.
    #[instrument(skip(self, message), fields(to = %message.to))]
    pub async fn send(&self, message: &EmailMessage) -> Result<DispatchOutcome, ProviderError> {
        let mut message = message.clone();
        if message.from.is_none() {
            message.from = Some(self.sender.clone());
        }

        // Step 1: template path.
        if message.has_template()
            && let Some(marketing) = &self.marketing
        {
            return match self.deliver(marketing.as_ref(), &message).await {
                Ok(outcome) => Ok(outcome),
                Err(e) if message.html_body.is_some() => {
                    warn!(
                        error = %e,
                        "marketing send failed, falling back to the transactional provider"
                    );
                    self.deliver(self.transactional.as_ref(), &message).await
                }
                Err(e) => Err(e),
            };
        }

        // Step 2: heuristic marketing path.
        if let Some(marketing) = &self.marketing
            && message
                .html_body
                .as_deref()
                .is_some_and(is_reengagement_content)
        {
            match self.deliver(marketing.as_ref(), &message).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    warn!(
                        error = %e,
                        "marketing send failed, continuing to the transactional provider"
                    );
                }
            }
        }

        // Step 3: transactional path. SES cannot render remote templates, so
        // inline content is mandatory here.
        if !message.has_inline_content() {
            return Err(ProviderError::Configuration(
                "message needs a subject and an HTML body for the transactional provider".into(),
            ));
        }
        self.deliver(self.transactional.as_ref(), &message).await
    }

    /// Send the e-mail for a business event.
    ///
    /// Composes the message from the event catalog (recipient, fallback
    /// subject and HTML, variable map), attaches the provider template
    /// identifier when the resolver finds one, and runs the provider
    /// policy. Events that track engagement get their row written after a
    /// successful send; that write is best-effort and never fails the call.
    #[instrument(skip(self, notification), fields(event = notification.email_type(), to = %notification.recipient()))]
    pub async fn notify(
        &self,
        notification: &Notification,
    ) -> Result<DispatchOutcome, ProviderError> {
        let spec = notification.message_spec(&self.app_url);

        let mut message = EmailMessage::new(notification.recipient())
            .with_subject(&spec.subject)
            .with_html_body(&spec.html)
            .with_template_data(spec.variables);

        if let Some(template_id) = self.resolver.resolve(&spec.template_name).await {
            message = message.with_template_id(template_id);
        }

        let outcome = self.send(&message).await?;

        if let Some((user_id, token)) = notification.engagement() {
            self.record_engagement(user_id, notification.email_type(), token)
                .await;
        }

        Ok(outcome)
    }

    async fn deliver(
        &self,
        transport: &dyn EmailTransport,
        message: &EmailMessage,
    ) -> Result<DispatchOutcome, ProviderError> {
        let receipt = transport.send(message).await?;
        info!(
            provider = %transport.kind(),
            message_id = receipt.message_id.as_deref().unwrap_or("unknown"),
            status = %receipt.status,
            "message delivered"
        );
        Ok(DispatchOutcome::delivered_by(transport.kind()))
    }

    /// Best-effort engagement write; failure is logged, never surfaced.
    async fn record_engagement(&self, user_id: &str, email_type: &str, token: &str) {
        let Some(store) = &self.engagement else {
            return;
        };
        let record = EngagementRecord::new(user_id, email_type, token);
        if let Err(e) = store.record(&record).await {
            warn!(error = %e, "engagement recording failed");
        }
    }
}
