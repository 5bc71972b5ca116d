use crate::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workflow {
    #[default]
    Answer,
    Chat,
    Docs,
}

#[derive(Debug)]
pub struct CliArgs {
    pub repo: String,
    pub workflow: Workflow,
    pub question: Option<String>,
    pub model: Option<String>,
}

pub fn parse_cli_args() -> Result<CliArgs, AppError> {
    parse_args(std::env::args().skip(1))
}

pub(crate) fn parse_args<I>(args: I) -> Result<CliArgs, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut repo: Option<String> = None;
    let mut workflow: Option<Workflow> = None;
    let mut question: Option<String> = None;
    let mut model: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--repo" | "-r" => {
                let value = args.next().ok_or_else(|| {
                    AppError::Config("Missing value for --repo argument".to_string())
                })?;
                repo = Some(value);
            }
            "--model" => {
                let value = args.next().ok_or_else(|| {
                    AppError::Config("Missing value for --model argument".to_string())
                })?;
                model = Some(value);
            }
            "--chat" => {
                if workflow.is_some() {
                    return Err(AppError::Config(
                        "It is an error to trigger more than one workflow at a time.".to_string(),
                    ));
                }
                workflow = Some(Workflow::Chat);
            }
            "--docs" => {
                if workflow.is_some() {
                    return Err(AppError::Config(
                        "It is an error to trigger more than one workflow at a time.".to_string(),
                    ));
                }
                workflow = Some(Workflow::Docs);
            }
            other if other.starts_with('-') => {
                return Err(AppError::Config(format!("Unknown argument: {other}")));
            }
            _ => {
                if question.is_some() {
                    return Err(AppError::Config(
                        "Only one question may be passed per invocation.".to_string(),
                    ));
                }
                question = Some(arg);
            }
        }
    }

    let repo = repo.ok_or_else(|| {
        AppError::Config("Missing required --repo owner/name argument".to_string())
    })?;

    let workflow = workflow.unwrap_or_default();
    if workflow == Workflow::Answer && question.is_none() {
        return Err(AppError::Config(
            "Pass a question to answer, or use --chat / --docs.".to_string(),
        ));
    }

    Ok(CliArgs {
        repo,
        workflow,
        question,
        model,
    })
}
