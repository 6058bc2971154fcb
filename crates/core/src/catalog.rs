//! Declarative mapping from business events to message content.
//!
//! Each [`Notification`] variant maps to exactly one [`MessageSpec`]: the
//! logical template name, the subject line, an unstyled fallback body used
//! when the remote template is unavailable, and the variable map substituted
//! into the remote template. Defaults applied here for omitted optional
//! fields are part of the contract.

use serde_json::{Map, Value, json};

use crate::notification::Notification;

/// Deletion-countdown threshold at or below which the final-notice
/// inactivity template is selected instead of the regular one.
pub const FINAL_NOTICE_DAYS: u32 = 7;

/// Template and fallback content for one event.
#[derive(Debug, Clone)]
pub struct MessageSpec {
    /// Logical template name, matching the renderer's file name
    /// (e.g. `"welcome.html"`).
    pub template_name: String,
    /// Subject line for inline-content sends.
    pub subject: String,
    /// Unstyled fallback HTML used when the remote template is unavailable.
    pub html: String,
    /// Variables substituted into the remote template.
    pub variables: Map<String, Value>,
}

fn spec(
    template_name: &str,
    subject: impl Into<String>,
    html: String,
    variables: Map<String, Value>,
) -> MessageSpec {
    MessageSpec {
        template_name: template_name.to_string(),
        subject: subject.into(),
        html,
        variables,
    }
}

fn object(value: Value) -> Map<String, Value> {
    if let Value::Object(map) = value {
        map
    } else {
        Map::new()
    }
}

impl Notification {
    /// Build the [`MessageSpec`] for this event. `app_url` is the
    /// application base URL that fallback bodies link back to.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn message_spec(&self, app_url: &str) -> MessageSpec {
        match self {
            Self::Welcome { parent_name, .. } => {
                let name = parent_name.as_deref().unwrap_or("there");
                spec(
                    "welcome.html",
                    "Welcome to Storytailor!",
                    format!(
                        "<p>Hi {name}, welcome to Storytailor.</p>\
                         <p>Create your first story at <a href=\"{app_url}\">{app_url}</a>.</p>"
                    ),
                    object(json!({ "app_url": app_url, "parent_name": name })),
                )
            }

            Self::InactivityWarning {
                days_inactive,
                days_until_deletion,
                tier,
                ..
            } => {
                let final_notice = *days_until_deletion <= FINAL_NOTICE_DAYS;
                spec(
                    if final_notice {
                        "inactivity-warning-final.html"
                    } else {
                        "inactivity-warning.html"
                    },
                    if final_notice {
                        "Final warning: your Storytailor stories will be deleted soon"
                    } else {
                        "We miss you at Storytailor"
                    },
                    format!(
                        "<p>This is a warning that your Storytailor account has been inactive \
                         for {days_inactive} days.</p>\
                         <p>Your stories will be deleted in {days_until_deletion} days unless \
                         you <a href=\"{app_url}/login\">sign back in</a>.</p>"
                    ),
                    object(json!({
                        "app_url": app_url,
                        "days_inactive": days_inactive,
                        "days_until_deletion": days_until_deletion,
                        "tier": tier,
                    })),
                )
            }

            Self::DeletionWarning {
                days_until_deletion,
                ..
            } => spec(
                "deletion-warning.html",
                "Your Storytailor account is scheduled for deletion",
                format!(
                    "<p>Your Storytailor account and stories will be deleted in \
                     {days_until_deletion} days.</p>\
                     <p><a href=\"{app_url}/login\">Sign in</a> to keep them.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "days_until_deletion": days_until_deletion,
                })),
            ),

            Self::DeletionConfirmation { .. } => spec(
                "deletion-confirmation.html",
                "Your Storytailor account has been deleted",
                format!(
                    "<p>Your Storytailor account and all associated stories have been \
                     deleted.</p>\
                     <p>You can start fresh anytime at <a href=\"{app_url}\">{app_url}</a>.</p>"
                ),
                object(json!({ "app_url": app_url })),
            ),

            Self::Hibernation { .. } => spec(
                "hibernation.html",
                "Your Storytailor account has been paused",
                format!(
                    "<p>Your Storytailor account is now hibernating. Your stories are safe \
                     and will be restored when you return.</p>\
                     <p><a href=\"{app_url}/login\">Sign in</a> anytime to wake it up.</p>"
                ),
                object(json!({ "app_url": app_url })),
            ),

            Self::AccountReactivated { .. } => spec(
                "account-reactivated.html",
                "Welcome back to Storytailor!",
                format!(
                    "<p>Your Storytailor account is active again and your stories are right \
                     where you left them.</p>\
                     <p>Pick up at <a href=\"{app_url}\">{app_url}</a>.</p>"
                ),
                object(json!({ "app_url": app_url })),
            ),

            Self::Receipt {
                amount,
                currency,
                plan_name,
                ..
            } => {
                let currency = currency.as_deref().unwrap_or("USD");
                spec(
                    "receipt.html",
                    "Your Storytailor receipt",
                    format!(
                        "<p>Thanks for your payment of {amount} {currency} for the \
                         {plan_name} plan.</p>\
                         <p>Manage your subscription at \
                         <a href=\"{app_url}/account/billing\">your billing page</a>.</p>"
                    ),
                    object(json!({
                        "app_url": app_url,
                        "amount": amount,
                        "currency": currency,
                        "plan_name": plan_name,
                    })),
                )
            }

            Self::Invitation {
                inviter_name,
                invite_url,
                ..
            } => spec(
                "invitation.html",
                format!("{inviter_name} invited you to Storytailor"),
                format!(
                    "<p>{inviter_name} has invited you to join Storytailor.</p>\
                     <p><a href=\"{invite_url}\">Accept the invitation</a> to get started.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "inviter_name": inviter_name,
                    "invite_url": invite_url,
                })),
            ),

            Self::StoryTransferRequest {
                sender_name,
                story_title,
                accept_url,
                ..
            } => spec(
                "story-transfer-request.html",
                format!("{sender_name} wants to share a story with you"),
                format!(
                    "<p>{sender_name} wants to transfer the story \"{story_title}\" to your \
                     Storytailor library.</p>\
                     <p><a href=\"{accept_url}\">Review the transfer</a>.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "sender_name": sender_name,
                    "story_title": story_title,
                    "accept_url": accept_url,
                })),
            ),

            Self::StoryTransferSent {
                story_title,
                recipient_email,
                ..
            } => spec(
                "story-transfer-sent.html",
                "Your story transfer is on its way",
                format!(
                    "<p>Your story \"{story_title}\" has been offered to \
                     {recipient_email}.</p>\
                     <p>We will let you know when they respond.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "story_title": story_title,
                    "recipient_email": recipient_email,
                })),
            ),

            Self::StoryTransferAccepted {
                story_title,
                recipient_name,
                ..
            } => spec(
                "story-transfer-accepted.html",
                "Your story transfer was accepted",
                format!(
                    "<p>{recipient_name} accepted the story \"{story_title}\". It now lives \
                     in their library.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "story_title": story_title,
                    "recipient_name": recipient_name,
                })),
            ),

            Self::StoryTransferRejected {
                story_title,
                recipient_name,
                ..
            } => spec(
                "story-transfer-rejected.html",
                "Your story transfer was declined",
                format!(
                    "<p>{recipient_name} declined the story \"{story_title}\". It remains in \
                     your library.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "story_title": story_title,
                    "recipient_name": recipient_name,
                })),
            ),

            Self::CharacterTransferRequest {
                sender_name,
                character_name,
                accept_url,
                ..
            } => spec(
                "character-transfer-request.html",
                format!("{sender_name} wants to share a character with you"),
                format!(
                    "<p>{sender_name} wants to transfer the character {character_name} to \
                     your Storytailor library.</p>\
                     <p><a href=\"{accept_url}\">Review the transfer</a>.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "sender_name": sender_name,
                    "character_name": character_name,
                    "accept_url": accept_url,
                })),
            ),

            Self::CharacterTransferSent {
                character_name,
                recipient_email,
                ..
            } => spec(
                "character-transfer-sent.html",
                "Your character transfer is on its way",
                format!(
                    "<p>Your character {character_name} has been offered to \
                     {recipient_email}.</p>\
                     <p>We will let you know when they respond.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "character_name": character_name,
                    "recipient_email": recipient_email,
                })),
            ),

            Self::CharacterTransferAccepted {
                character_name,
                recipient_name,
                ..
            } => spec(
                "character-transfer-accepted.html",
                "Your character transfer was accepted",
                format!(
                    "<p>{recipient_name} accepted {character_name}. The character now lives \
                     in their library.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "character_name": character_name,
                    "recipient_name": recipient_name,
                })),
            ),

            Self::CharacterTransferRejected {
                character_name,
                recipient_name,
                ..
            } => spec(
                "character-transfer-rejected.html",
                "Your character transfer was declined",
                format!(
                    "<p>{recipient_name} declined {character_name}. The character remains in \
                     your library.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "character_name": character_name,
                    "recipient_name": recipient_name,
                })),
            ),

            Self::SubscriptionStarted { plan_name, .. } => spec(
                "subscription-started.html",
                "Your Storytailor subscription is active",
                format!(
                    "<p>Your {plan_name} subscription is now active.</p>\
                     <p>Manage it anytime at \
                     <a href=\"{app_url}/account/billing\">your billing page</a>.</p>"
                ),
                object(json!({ "app_url": app_url, "plan_name": plan_name })),
            ),

            Self::SubscriptionUpgraded {
                old_plan, new_plan, ..
            } => spec(
                "subscription-upgraded.html",
                "Your Storytailor plan has been upgraded",
                format!(
                    "<p>Your plan changed from {old_plan} to {new_plan}. The new features \
                     are available immediately.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "old_plan": old_plan,
                    "new_plan": new_plan,
                })),
            ),

            Self::SubscriptionDowngraded {
                old_plan,
                new_plan,
                effective_on,
                ..
            } => spec(
                "subscription-downgraded.html",
                "Your Storytailor plan change is scheduled",
                format!(
                    "<p>Your plan will change from {old_plan} to {new_plan} on \
                     {effective_on}.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "old_plan": old_plan,
                    "new_plan": new_plan,
                    "effective_on": effective_on,
                })),
            ),

            Self::SubscriptionCanceled {
                plan_name,
                access_until,
                ..
            } => spec(
                "subscription-canceled.html",
                "Your Storytailor subscription has been canceled",
                format!(
                    "<p>Your {plan_name} subscription is canceled. You keep full access \
                     until {access_until}.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "plan_name": plan_name,
                    "access_until": access_until,
                })),
            ),

            Self::SubscriptionRenewed {
                plan_name, amount, ..
            } => spec(
                "subscription-renewed.html",
                "Your Storytailor subscription has renewed",
                format!(
                    "<p>Your {plan_name} subscription renewed for {amount}.</p>\
                     <p>Your receipt is available at \
                     <a href=\"{app_url}/account/billing\">your billing page</a>.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "plan_name": plan_name,
                    "amount": amount,
                })),
            ),

            Self::TrialEnding { days_left, .. } => {
                let days = days_left.unwrap_or(3);
                spec(
                    "trial-ending.html",
                    format!("Your Storytailor trial ends in {days} days"),
                    format!(
                        "<p>Your free trial ends in {days} days. Choose a plan to keep your \
                         stories going.</p>\
                         <p><a href=\"{app_url}/account/billing\">Pick a plan</a>.</p>"
                    ),
                    object(json!({ "app_url": app_url, "days_left": days })),
                )
            }

            Self::PaymentFailed {
                amount, update_url, ..
            } => spec(
                "payment-failed.html",
                "Payment failed for your Storytailor subscription",
                format!(
                    "<p>We could not process your payment of {amount}.</p>\
                     <p><a href=\"{update_url}\">Update your payment method</a> to keep your \
                     subscription active.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "amount": amount,
                    "update_url": update_url,
                })),
            ),

            Self::DataExportReady {
                download_url,
                expires_in_days,
                ..
            } => {
                let expires = expires_in_days.unwrap_or(7);
                spec(
                    "data-export-ready.html",
                    "Your Storytailor data export is ready",
                    format!(
                        "<p>Your data export is ready. \
                         <a href=\"{download_url}\">Download it here</a>.</p>\
                         <p>The link expires in {expires} days.</p>"
                    ),
                    object(json!({
                        "app_url": app_url,
                        "download_url": download_url,
                        "expires_in_days": expires,
                    })),
                )
            }

            Self::ParentInsight {
                child_name,
                stories_created,
                reading_minutes,
                ..
            } => spec(
                "parent-insight.html",
                format!("{child_name}'s month in stories"),
                format!(
                    "<p>{child_name} created {stories_created} stories and spent \
                     {reading_minutes} minutes reading this month.</p>\
                     <p>See the full picture at \
                     <a href=\"{app_url}/insights\">your insights page</a>.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "child_name": child_name,
                    "stories_created": stories_created,
                    "reading_minutes": reading_minutes,
                })),
            ),

            Self::SystemOutage { status_url, .. } => spec(
                "system-outage.html",
                "Storytailor service disruption",
                format!(
                    "<p>We are investigating a service disruption affecting Storytailor.</p>\
                     <p>Live updates: <a href=\"{status_url}\">{status_url}</a>.</p>"
                ),
                object(json!({ "app_url": app_url, "status_url": status_url })),
            ),

            Self::SystemRestored { .. } => spec(
                "system-restored.html",
                "Storytailor is back to normal",
                format!(
                    "<p>The earlier service disruption is resolved and Storytailor is \
                     operating normally again.</p>\
                     <p>Thanks for your patience. <a href=\"{app_url}\">{app_url}</a></p>"
                ),
                object(json!({ "app_url": app_url })),
            ),

            Self::RetentionNudge {
                days_since_last_story,
                ..
            } => spec(
                "retention-nudge.html",
                "Your stories miss you",
                format!(
                    "<p>It has been {days_since_last_story} days since your last story.</p>\
                     <p><a href=\"{app_url}/stories/new\">Start a new one</a> tonight.</p>"
                ),
                object(json!({
                    "app_url": app_url,
                    "days_since_last_story": days_since_last_story,
                })),
            ),

            Self::EngagementNudge { story_prompt, .. } => spec(
                "engagement-nudge.html",
                "A story idea for tonight",
                format!(
                    "<p>Need a spark? Try this prompt: {story_prompt}</p>\
                     <p><a href=\"{app_url}/stories/new\">Start writing</a>.</p>"
                ),
                object(json!({ "app_url": app_url, "story_prompt": story_prompt })),
            ),

            Self::WinBack {
                discount_percent,
                promo_code,
                ..
            } => {
                let discount = discount_percent.unwrap_or(15);
                spec(
                    "win-back.html",
                    format!("Come back to Storytailor and save {discount}%"),
                    format!(
                        "<p>We would love to have you back. Use code {promo_code} for \
                         {discount}% off your first month.</p>\
                         <p><a href=\"{app_url}/account/billing\">Redeem it here</a>.</p>"
                    ),
                    object(json!({
                        "app_url": app_url,
                        "discount_percent": discount,
                        "promo_code": promo_code,
                    })),
                )
            }
        }
    }
}
