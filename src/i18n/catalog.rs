use super::{CatalogError, Locale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Title,
    Beta,
    Description,
    AboutTitle,
    AboutText,
    Camera,
    Upload,
    Result,
    Confidence,
    Unknown,
    CloseCamera,
    Reset,
    Analyzing,
    PickImage,
    About,
    Error,
    Ok,
    Cancel,
    Server,
    ImageUnavailable,
    AnalysisInProgress,
    CameraUnavailable,
}

impl MessageKey {
    pub const ALL: [MessageKey; 22] = [
        Self::Title,
        Self::Beta,
        Self::Description,
        Self::AboutTitle,
        Self::AboutText,
        Self::Camera,
        Self::Upload,
        Self::Result,
        Self::Confidence,
        Self::Unknown,
        Self::CloseCamera,
        Self::Reset,
        Self::Analyzing,
        Self::PickImage,
        Self::About,
        Self::Error,
        Self::Ok,
        Self::Cancel,
        Self::Server,
        Self::ImageUnavailable,
        Self::AnalysisInProgress,
        Self::CameraUnavailable,
    ];
}

/// Class labels in the order of the classifier's `class_id`.
const CLASS_LABEL_COUNT: usize = 3;

const ENGLISH_LABELS: &[&str] = &["Khalas", "Razeez", "Shishi"];
const ARABIC_LABELS: &[&str] = &["خلاص", "رزيز", "شيشي"];

const ENGLISH: &[(MessageKey, &str)] = &[
    (MessageKey::Title, "Palm Tree Classifier"),
    (MessageKey::Beta, "BETA VERSION"),
    (
        MessageKey::Description,
        "Welcome to the Smart Palm Classifier!\n\
         This AI tool identifies palm types (Khalas, Razeez, Shishi).\n\n\
         How to use:\n\
         1) Take Photo or Upload File\n\
         2) Provide an image\n\
         3) Get instant results!",
    ),
    (MessageKey::AboutTitle, "About the Project"),
    (
        MessageKey::AboutText,
        "Ensemble of ConvNeXt Small models. Uses Test Time Augmentation (flip) \
         to classify palm types with robustness.",
    ),
    (MessageKey::Camera, "Take Photo"),
    (MessageKey::Upload, "Upload File"),
    (MessageKey::Result, "Result"),
    (MessageKey::Confidence, "Confidence"),
    (MessageKey::Unknown, "Unknown / Other"),
    (MessageKey::CloseCamera, "Close Camera"),
    (MessageKey::Reset, "Reset / New Prediction"),
    (MessageKey::Analyzing, "Analyzing..."),
    (MessageKey::PickImage, "Pick an image (jpg/png)"),
    (MessageKey::About, "About"),
    (MessageKey::Error, "Error"),
    (MessageKey::Ok, "OK"),
    (MessageKey::Cancel, "Cancel"),
    (MessageKey::Server, "Server"),
    (MessageKey::ImageUnavailable, "File not found"),
    (
        MessageKey::AnalysisInProgress,
        "An image is already being analyzed.",
    ),
    (
        MessageKey::CameraUnavailable,
        "Camera capture is not available on desktop.\nUse Upload File instead.",
    ),
];

const ARABIC: &[(MessageKey, &str)] = &[
    (MessageKey::Title, "مُصنف النخيل"),
    (MessageKey::Beta, "نسخة تجريبية"),
    (
        MessageKey::Description,
        "مرحبًا بكم في المصنف الذكي للنخيل!\n\
         تقوم هذه الأداة بتصنيف أنواع النخيل (خلاص، رزيز، شيشي).\n\n\
         طريقة الاستخدام:\n\
         1) التقط صورة أو ارفع صورة\n\
         2) اختر صورة للنخلة\n\
         3) ستحصل على النتيجة فوراً!",
    ),
    (MessageKey::AboutTitle, "عن المشروع"),
    (
        MessageKey::AboutText,
        "مجموعة نماذج ConvNeXt Small. يستخدم TTA (قلب الصورة) \
         لزيادة ثبات ودقة التصنيف.",
    ),
    (MessageKey::Camera, "التقط صورة"),
    (MessageKey::Upload, "ارفع صورة"),
    (MessageKey::Result, "النتيجة"),
    (MessageKey::Confidence, "الدقة"),
    (MessageKey::Unknown, "غير معروف / نوع آخر"),
    (MessageKey::CloseCamera, "إغلاق الكاميرا"),
    (MessageKey::Reset, "إعادة تعيين / فحص جديد"),
    (MessageKey::Analyzing, "جاري التحليل..."),
    (MessageKey::PickImage, "اختر صورة (jpg/png)"),
    (MessageKey::About, "عن المشروع"),
    (MessageKey::Error, "خطأ"),
    (MessageKey::Ok, "موافق"),
    (MessageKey::Cancel, "إلغاء"),
    (MessageKey::Server, "الخادم"),
    (MessageKey::ImageUnavailable, "الملف غير موجود"),
    (MessageKey::AnalysisInProgress, "جاري تحليل صورة بالفعل."),
    (
        MessageKey::CameraUnavailable,
        "التقاط الصور غير متاح على سطح المكتب.\nاستخدم رفع صورة بدلاً من ذلك.",
    ),
];

fn table(locale: Locale) -> &'static [(MessageKey, &'static str)] {
    match locale {
        Locale::En => ENGLISH,
        Locale::Ar => ARABIC,
    }
}

fn labels(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH_LABELS,
        Locale::Ar => ARABIC_LABELS,
    }
}

fn lookup(locale: Locale, key: MessageKey) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, text)| *text)
}

/// Logical (unshaped) text for `key` in `locale`.
///
/// [`verify_catalog`] guarantees every key is present; a missing entry falls
/// back to English so a broken table never blanks the UI.
pub fn text(locale: Locale, key: MessageKey) -> &'static str {
    lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .unwrap_or_default()
}

/// Catalog label for a classifier index, or `None` when the index is absent
/// or outside the known label set.
pub fn class_label(locale: Locale, class_index: Option<i64>) -> Option<&'static str> {
    let index = usize::try_from(class_index?).ok()?;
    labels(locale).get(index).copied()
}

/// Check that every locale defines every key and the full label set.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for locale in Locale::ALL {
        if let Some(key) = MessageKey::ALL
            .iter()
            .copied()
            .find(|key| lookup(locale, *key).is_none())
        {
            return Err(CatalogError::MissingKey { locale, key });
        }

        let found = labels(locale).len();
        if found != CLASS_LABEL_COUNT {
            return Err(CatalogError::LabelCount {
                locale,
                found,
                expected: CLASS_LABEL_COUNT,
            });
        }
    }
    Ok(())
}
