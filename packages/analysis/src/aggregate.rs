use crate::classify::classify;
use crate::error::LoadError;
use crate::extract::extract_props_type;
use crate::facade::{SourceFacade, UnitLoader};
use crate::options::AnalyzeOptions;
use crate::progress::{Progress, ProgressEvent};
use crate::resolve::resolve;
use crate::types::{Classification, FileReport, ReportMap};
use std::path::{Path, PathBuf};

/// Analyze every exported declaration of a single unit
///
/// Each declaration runs classify -> extract -> resolve. Declarations that
/// fall out anywhere along that chain are counted as skipped; nothing a
/// single declaration does can abort the unit.
pub fn analyze_unit<F, P>(
    facade: &F,
    path: &str,
    options: &AnalyzeOptions,
    progress: &mut P,
) -> FileReport
where
    F: SourceFacade,
    P: Progress,
{
    let mut report = FileReport::new();

    for decl in facade.exported_declarations() {
        let name = facade.declaration_name(&decl);

        let classification = classify(facade, &decl, options);
        if classification == Classification::NotAComponent {
            report.skipped += 1;
            progress.on_event(ProgressEvent::DeclarationSkipped { path, name: &name });
            continue;
        }

        let Some(props_type) = extract_props_type(facade, &decl, classification) else {
            report.skipped += 1;
            progress.on_event(ProgressEvent::DeclarationSkipped { path, name: &name });
            continue;
        };

        let shape = resolve(facade, &props_type, options.max_depth);
        progress.on_event(ProgressEvent::ComponentResolved { path, name: &name });
        report.insert(name, shape);
    }

    report
}

/// Analyze a single file through a unit loader
pub fn analyze_file<L, P>(
    loader: &L,
    path: &Path,
    options: &AnalyzeOptions,
    progress: &mut P,
) -> Result<FileReport, LoadError>
where
    L: UnitLoader,
    P: Progress,
{
    let unit = loader.load(path)?;
    Ok(analyze_unit(
        &unit,
        &path.display().to_string(),
        options,
        progress,
    ))
}

/// Analyze files independently, in input order
///
/// Each file's report is emitted as it completes. A file that fails to
/// load is reported through the progress callback and does not abort the
/// remaining files; only successful files appear in the returned map.
pub fn analyze_files<L, P>(
    loader: &L,
    paths: &[PathBuf],
    options: &AnalyzeOptions,
    progress: &mut P,
) -> ReportMap
where
    L: UnitLoader,
    P: Progress,
{
    let mut reports = Vec::new();

    for path in paths {
        let display = path.display().to_string();
        progress.on_event(ProgressEvent::FileStarted { path: &display });

        match loader.load(path) {
            Ok(unit) => {
                let report = analyze_unit(&unit, &display, options, progress);
                progress.on_event(ProgressEvent::FileAnalyzed {
                    path: &display,
                    report: &report,
                });
                reports.push((display, report));
            }
            Err(err) => {
                progress.on_event(ProgressEvent::FileFailed {
                    path: &display,
                    message: &err.to_string(),
                });
            }
        }
    }

    ReportMap(reports)
}
