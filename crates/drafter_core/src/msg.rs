use std::path::PathBuf;

use crate::{ExportFormat, ExportSummary, GenerationOutcome, Preferences};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a cloud provider in the wizard.
    ProviderSelected(String),
    /// User picked an industry. A preference only, not a wizard field.
    IndustrySelected(String),
    /// User edited the project description text area.
    DescriptionChanged(String),
    /// User chose a file in the PDF picker.
    PdfFileChosen { path: PathBuf },
    /// Engine finished extracting text from the chosen PDF.
    PdfExtracted { file_name: String, text: String },
    /// Engine failed to read or parse the chosen PDF.
    PdfExtractionFailed { reason: String },
    /// User clicked Next.
    NextClicked,
    /// User clicked Previous.
    BackClicked,
    /// User clicked Generate Diagram on the confirm step.
    GenerateClicked,
    /// Engine completed the generation request, either way.
    GenerationFinished(Result<GenerationOutcome, String>),
    /// User stepped the carousel forward.
    CarouselNext,
    /// User stepped the carousel backward.
    CarouselPrev,
    /// User opened the fullscreen slideshow at the current image.
    FullscreenOpened,
    /// User closed the fullscreen slideshow.
    FullscreenClosed,
    /// User stepped the fullscreen image forward.
    FullscreenNext,
    /// User stepped the fullscreen image backward.
    FullscreenPrev,
    /// Slideshow timer fired; advances the fullscreen image while open.
    SlideshowTick,
    /// User toggled between the description and the diagram code.
    CodeViewToggled,
    /// User opened the diagram code editor.
    EditStarted,
    /// User edited the code buffer.
    EditChanged(String),
    /// User discarded the code buffer.
    EditCancelled,
    /// User submitted the edited code for regeneration.
    EditSubmitted,
    /// Engine completed the regeneration request, either way.
    RegenerationFinished(Result<GenerationOutcome, String>),
    /// User exported a single image by carousel position.
    ExportRequested { index: usize, format: ExportFormat },
    /// User exported every image.
    ExportAllRequested { format: ExportFormat },
    /// Engine finished an export run.
    ExportFinished(Result<ExportSummary, String>),
    /// User left the results screen for a fresh wizard.
    BackToWizard,
    /// Store finished loading persisted preferences at startup.
    PreferencesLoaded(Preferences),
    /// Notice timer fired; clears the notice if it is still the same one.
    NoticeExpired { id: u64 },
    /// User dismissed the blocking alert.
    AlertDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
