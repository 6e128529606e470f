/// Comparison outcome readout
///
/// Renders what the last submission attempt produced: a validation or
/// submission error, the optional service message, and the similarity /
/// verification card.
use iced::widget::{column, container, text, Column};
use iced::{Element, Length};

use crate::api::error::CompareError;
use crate::api::response::ComparisonResult;
use crate::state::flow::FlowError;
use crate::Message;

/// Format the similarity score the way the operator sees it
pub fn score_line(score: f64) -> String {
    format!("Similarity: {score:.2}%")
}

/// Format the verification verdict
pub fn verified_line(verified: bool) -> String {
    let verdict = if verified { "Yes" } else { "No" };
    format!("Verified: {verdict}")
}

/// Build the readout below the form
///
/// Nothing is rendered until an attempt has settled; afterwards the cards
/// persist until the next attempt starts.
pub fn outcome_view<'a>(
    result: Option<&'a ComparisonResult>,
    error: Option<&'a FlowError>,
) -> Element<'a, Message> {
    let mut readout: Column<'a, Message> = Column::new().spacing(12);

    if let Some(error) = error {
        readout = readout.push(error_card(error));
    }

    if let Some(result) = result {
        if let Some(message) = &result.message {
            readout = readout.push(card(
                text(message.as_str()).size(18).style(text::success),
            ));
        }

        if let Some(score) = result.score {
            let mut lines = column![text(score_line(score)).size(18)].spacing(4);
            if let Some(verified) = result.verified {
                lines = lines.push(text(verified_line(verified)).size(18));
            }
            readout = readout.push(card(lines));
        }
    }

    readout.into()
}

/// Error card for either failure kind
///
/// Validation errors read out directly; submission errors keep the single
/// generic headline with the classified detail underneath.
fn error_card(error: &FlowError) -> Element<'_, Message> {
    let body: Column<'_, Message> = match error {
        FlowError::Validation(error) => {
            column![text(error.to_string()).size(16).style(text::danger)]
        }
        FlowError::Submission(error) => column![
            text(CompareError::HEADLINE).size(18).style(text::danger),
            text(error.to_string()).size(14),
        ]
        .spacing(4),
    };

    card(body)
}

/// Shared card chrome for readout entries
fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(14)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
