use iced::widget::{button, column, container, pick_list, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod source;
mod state;
mod ui;

use api::client::CompareClient;
use api::error::CompareError;
use api::response::ComparisonResult;
use config::Config;
use source::{ImagePayload, SourceError, SourceKind};
use state::flow::SubmissionFlow;
use state::form::AlgorithmVariant;

/// Main application state
struct FaceCompare {
    /// The submission lifecycle state machine
    flow: SubmissionFlow,
    /// Which image source the operator is using right now
    source_kind: SourceKind,
    /// Client for the comparison service
    client: CompareClient,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Registration number edited
    IdentifierChanged(String),
    /// Comparison model picked from the dropdown
    VariantSelected(AlgorithmVariant),
    /// Image source toggled (file upload vs. camera)
    SourceSelected(SourceKind),
    /// User clicked the file picker button
    PickImage,
    /// User clicked the capture button
    CaptureFrame,
    /// A photo arrived from either source
    ImageReady(Result<ImagePayload, SourceError>),
    /// User clicked the submit control
    Submit,
    /// The comparison request resolved
    CompareFinished(Result<ComparisonResult, CompareError>),
}

impl FaceCompare {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let client = CompareClient::new(&config);

        (
            FaceCompare {
                flow: SubmissionFlow::default(),
                source_kind: SourceKind::default(),
                client,
                status: "Ready.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::IdentifierChanged(value) => {
                self.flow.form.identifier = value;
                Task::none()
            }
            Message::VariantSelected(variant) => {
                self.flow.form.variant = variant;
                Task::none()
            }
            Message::SourceSelected(kind) => {
                self.source_kind = kind;
                Task::none()
            }
            Message::PickImage => {
                // Native dialog, synchronous like the rest of the update
                // loop; the file read happens in a background task.
                if let Some(path) = source::pick_file() {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(source::load_payload(path), Message::ImageReady);
                }
                Task::none()
            }
            Message::CaptureFrame => {
                Task::perform(source::capture_frame(), Message::ImageReady)
            }
            Message::ImageReady(Ok(payload)) => {
                self.status = format!("Selected {}", payload.summary());
                self.flow.form.image = Some(payload);
                Task::none()
            }
            Message::ImageReady(Err(error)) => {
                warn!(%error, "image acquisition failed");
                self.status = error.to_string();
                Task::none()
            }
            Message::Submit => {
                match self.flow.begin_submit() {
                    Some(request) => {
                        self.status = "Comparing...".to_string();
                        // Exactly one request per accepted submit; the
                        // submit control stays disabled until it settles.
                        let client = self.client.clone();
                        Task::perform(client.compare(request), Message::CompareFinished)
                    }
                    // Validation failed; the error is already recorded.
                    None => Task::none(),
                }
            }
            Message::CompareFinished(outcome) => {
                self.flow.finish(outcome);
                self.status = "Ready.".to_string();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let busy = self.flow.is_busy();

        let identifier_input = text_input("Registration Number", &self.flow.form.identifier)
            .on_input(Message::IdentifierChanged)
            .padding(10);

        let source_toggle = row![
            source_button("Choose Image", SourceKind::FileUpload, self.source_kind),
            source_button("Open Camera", SourceKind::Camera, self.source_kind),
        ]
        .spacing(10);

        let variant_picker = row![
            text("Comparison model:").size(16),
            pick_list(
                AlgorithmVariant::ALL,
                Some(self.flow.form.variant),
                Message::VariantSelected,
            ),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let submit_label = if busy { "Comparing..." } else { "Compare Image" };
        let mut submit = button(text(submit_label)).padding(10).width(Length::Fill);
        if !busy {
            submit = submit.on_press(Message::Submit);
        }

        let content: Column<Message> = column![
            text("Compare Student Image").size(32),
            identifier_input,
            source_toggle,
            variant_picker,
            self.source_view(),
            submit,
            ui::readout::outcome_view(self.flow.result(), self.flow.error()),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(30)
        .width(440)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// The source-specific part of the form: picker or capture control,
    /// plus a summary and preview of the photo currently selected
    fn source_view(&self) -> Element<Message> {
        let acquire: Element<Message> = match self.source_kind {
            SourceKind::FileUpload => button("Browse...")
                .on_press(Message::PickImage)
                .padding(10)
                .into(),
            SourceKind::Camera => button("Capture Photo")
                .on_press(Message::CaptureFrame)
                .padding(10)
                .into(),
        };

        let mut section: Column<Message> = column![acquire].spacing(10);

        match &self.flow.form.image {
            Some(payload) => {
                section = section.push(text(payload.summary()).size(14));
                section = section.push(
                    iced::widget::image(iced::widget::image::Handle::from_bytes(
                        payload.bytes.clone(),
                    ))
                    .width(160),
                );
            }
            None => {
                section = section.push(text("No image selected").size(14));
            }
        }

        section.align_x(Alignment::Center).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// One half of the mutually-exclusive source toggle
fn source_button(
    label: &str,
    kind: SourceKind,
    selected: SourceKind,
) -> Element<'_, Message> {
    let style = if kind == selected {
        button::primary
    } else {
        button::secondary
    };

    button(text(label))
        .on_press(Message::SourceSelected(kind))
        .style(style)
        .padding(10)
        .width(Length::Fill)
        .into()
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("face_compare=info")),
        )
        .init();

    iced::application("Face Compare", FaceCompare::update, FaceCompare::view)
        .theme(FaceCompare::theme)
        .centered()
        .run_with(FaceCompare::new)
}
