// ABOUTME: Command-line tool that builds a sample SMS-SUBMIT and prints or sends its AT+CMGS script
// ABOUTME: Covers plain text, flash, replaceable, voicemail indication, SI, SL and a signed provisioning push

use argh::FromArgs;
use chrono::{Days, Local};
use smspdu::wbxml::{ServiceIndicationAction, ServiceLoadingAction};
use smspdu::{
    IndicationKind, MessageIndication, Modem, ModemConfig, SecurityMethod, ServiceIndication,
    ServiceLoading, ShortMessageType, SmsSubmit, TextMessage, ValidityPeriod, WapPushMessage,
    WbxmlDocument,
};
use std::error::Error;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

const INITIATOR: &str = "smspdu";

const PROVISIONING_XML: &str = concat!(
    r#"<wap-provisioningdoc><characteristic type="BrowserFavorite">"#,
    r#"<characteristic type="smspdu"><parm name="URL" value="https://www.example.com/"/>"#,
    r#"</characteristic></characteristic></wap-provisioningdoc>"#,
);

/// Build a sample SMS and print the modem script, or send it through a modem
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,

    /// sample to build: text, flash, replace, voicemail-on, voicemail-off, si, sl,
    /// provisioning (default: text)
    #[argh(option, short = 'k', default = "SampleKind::Text")]
    kind: SampleKind,

    /// text for the text, flash and replace samples
    #[argh(option, short = 'm')]
    message: Option<String>,

    /// serial device of a modem in PDU mode; without it the script is printed
    #[argh(option)]
    device: Option<String>,

    /// user PIN for the provisioning sample (default: 1234)
    #[argh(option)]
    user_pin: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SampleKind {
    Text,
    Flash,
    Replace,
    VoicemailOn,
    VoicemailOff,
    ServiceIndication,
    ServiceLoading,
    Provisioning,
}

impl FromStr for SampleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SampleKind::Text),
            "flash" => Ok(SampleKind::Flash),
            "replace" => Ok(SampleKind::Replace),
            "voicemail-on" => Ok(SampleKind::VoicemailOn),
            "voicemail-off" => Ok(SampleKind::VoicemailOff),
            "si" => Ok(SampleKind::ServiceIndication),
            "sl" => Ok(SampleKind::ServiceLoading),
            "provisioning" => Ok(SampleKind::Provisioning),
            other => Err(format!("unknown sample kind: {other}")),
        }
    }
}

fn build_sample(args: &CliArgs) -> Result<SmsSubmit, Box<dyn Error>> {
    let text = |default: &str| args.message.clone().unwrap_or_else(|| default.to_owned());

    let sms = match args.kind {
        SampleKind::Text => SmsSubmit::builder()
            .phone_number(&args.to)
            .content(TextMessage::new(text("Hello World from smspdu!")))
            // the SMS center retries delivery for five days
            .validity_period(ValidityPeriod::from_days(5))
            .build(),
        SampleKind::Flash => SmsSubmit::builder()
            .phone_number(&args.to)
            .content(TextMessage::new(text("Flash message from smspdu!")))
            .indication(MessageIndication::flash())
            .build(),
        SampleKind::Replace => SmsSubmit::builder()
            .phone_number(&args.to)
            .content(TextMessage::new(text("This message replaces the previous one")))
            .protocol_identifier(ShortMessageType::Replace1)
            .build(),
        SampleKind::VoicemailOn => SmsSubmit::builder()
            .phone_number(&args.to)
            .content(TextMessage::new("You have a voicemail."))
            .indication(MessageIndication::discard(IndicationKind::Voicemail, true))
            .build(),
        SampleKind::VoicemailOff => SmsSubmit::builder()
            .phone_number(&args.to)
            .content(TextMessage::default())
            .indication(MessageIndication::discard(IndicationKind::Voicemail, false))
            .build(),
        SampleKind::ServiceIndication => {
            let now = Local::now().naive_local();
            let si = ServiceIndication::new(
                "Service indication from smspdu",
                "https://www.example.com/news",
            )
            .with_action(ServiceIndicationAction::SignalMedium)
            .with_expires(now.checked_add_days(Days::new(3)).unwrap_or(now));

            let push = WapPushMessage::from_document(&WbxmlDocument::from(si))?
                .with_initiator_uri(INITIATOR);
            SmsSubmit::new(&args.to, push)
        }
        SampleKind::ServiceLoading => {
            let sl = ServiceLoading::new("http://www.example.com/app.cab")
                .with_action(ServiceLoadingAction::ExecuteHigh);

            let push = WapPushMessage::from_document(&WbxmlDocument::from(sl))?
                .with_initiator_uri(INITIATOR);
            SmsSubmit::new(&args.to, push)
        }
        SampleKind::Provisioning => {
            let pin = args.user_pin.clone().unwrap_or_else(|| "1234".to_owned());
            let push = WapPushMessage::new(PROVISIONING_XML.as_bytes())
                .with_content_type("text/vnd.wap.connectivity-xml")
                .with_security(SecurityMethod::UserPin)
                .with_user_pin(pin)
                .with_initiator_uri(INITIATOR);
            SmsSubmit::new(&args.to, push)
        }
    };

    Ok(sms)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let default_level = if cli_args.debugging { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let sms = build_sample(&cli_args)?;

    let Some(device) = &cli_args.device else {
        for pdu in sms.to_pdus()? {
            println!("AT+CMGS={}", pdu.cmgs_length());
            println!("{}<Ctrl-Z>", pdu.to_hex());
        }
        return Ok(());
    };

    info!(device = %device, kind = ?cli_args.kind, "Opening modem");
    let port = tokio::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(device)
        .await?;

    let mut modem = Modem::new(port, ModemConfig::default());
    if let Err(e) = modem.initialize().await {
        eprintln!("Error: no response from modem: {e}");
        return Err(e.into());
    }

    let parts = modem.send_submission(&sms).await?;
    println!("Message sent to modem in {parts} part(s)");

    Ok(())
}
