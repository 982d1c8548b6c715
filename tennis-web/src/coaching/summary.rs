//! Assistant payloads: live-summary prompt, offline narration and the
//! structured photo-analysis result returned by the external model.

use serde::{Deserialize, Serialize};

use crate::analysis::{PerformanceAnalysis, PostureStatus};
use crate::classifier::ShotType;
use crate::config::Language;
use crate::error::EngineError;

/// Word cap requested from the refinement model
const SUMMARY_WORD_LIMIT: usize = 60;

/// Prompt asking the external model to turn live metrics into a short summary
pub fn summary_prompt(analysis: &PerformanceAnalysis, language: Language) -> String {
    let (intro, lang_name) = match language {
        Language::English => (
            "As a professional tennis coach, turn this live tracking data into a brief, professional summary in English only:",
            "English",
        ),
        Language::Arabic => (
            "بصفتك مدرب تنس محترف، قم بتحويل بيانات التتبع المباشر هذه إلى ملخص موجز واحترافي باللغة العربية فقط:",
            "Arabic",
        ),
    };

    format!(
        "{intro}\n\
         Shot type: {shot}\n\
         Accuracy: {accuracy}%\n\
         Stability: {stability}%\n\
         Mistakes: {mistakes}\n\
         Recommendations: {tips}\n\
         Keep it under {limit} words and write in {lang_name} only.",
        shot = analysis.shot_type.label(language),
        accuracy = analysis.accuracy_score,
        stability = analysis.stability_score,
        mistakes = analysis.mistakes.join(", "),
        tips = analysis.recommendations.join(", "),
        limit = SUMMARY_WORD_LIMIT,
    )
}

/// Instruction sent alongside a photo for structured analysis
///
/// The reply is expected as the JSON object parsed by `ImageAnalysis`.
pub fn image_analysis_prompt(language: Language) -> &'static str {
    match language {
        Language::English => {
            "Analyze the tennis player's performance in this image. Identify the shot type, \
             assess body posture, rate the balance level and describe court positioning. \
             Give specific improvement tips. All text must be in English. Return valid JSON \
             with the fields shotType, postureAnalysis, balanceLevel, courtPositioning and \
             improvementTips (an array of strings)."
        }
        Language::Arabic => {
            "قم بتحليل أداء لاعب التنس في هذه الصورة. حدد نوع الضربة، وقيم وضعية الجسم، \
             وقيم مستوى التوازن، وحدد التمركز في الملعب. قدم نصائح محددة للتحسين. يجب أن \
             تكون جميع النصوص باللغة العربية الفصحى. أرجع البيانات بتنسيق JSON صالح يحتوي \
             على الحقول shotType و postureAnalysis و balanceLevel و courtPositioning و \
             improvementTips."
        }
    }
}

/// System instruction for the coaching chat persona
pub fn chat_system_instruction(language: Language) -> &'static str {
    match language {
        Language::English => {
            "You are an expert world-class tennis coach (the Noor system). Every answer must \
             be in English only, professional and concise."
        }
        Language::Arabic => {
            "أنت مدرب تنس عالمي خبير (نظام نور). يجب أن تكون جميع إجاباتك باللغة العربية \
             الفصحى حصراً، وبأسلوب احترافي وموجز."
        }
    }
}

/// Offline narration of the latest metrics
pub fn local_summary(analysis: &PerformanceAnalysis, language: Language) -> String {
    let shot = analysis.shot_type.label(language);
    match language {
        Language::English => {
            let verdict = match analysis.posture_status {
                PostureStatus::Correct => "Your posture looks correct.",
                PostureStatus::NeedsAdjustment => "Your posture needs adjustment.",
            };
            let mut text = format!(
                "{shot}: accuracy {}%, stability {}%. {verdict}",
                analysis.accuracy_score, analysis.stability_score
            );
            if let Some(tip) = analysis.recommendations.first() {
                text.push_str(&format!(" Focus on this: {tip}."));
            } else {
                text.push_str(" Keep improving your game!");
            }
            text
        }
        Language::Arabic => {
            let verdict = match analysis.posture_status {
                PostureStatus::Correct => "وضعيتك صحيحة.",
                PostureStatus::NeedsAdjustment => "وضعيتك تحتاج إلى تعديل.",
            };
            let mut text = format!(
                "{shot}: الدقة {}%، الثبات {}%. {verdict}",
                analysis.accuracy_score, analysis.stability_score
            );
            if let Some(tip) = analysis.recommendations.first() {
                text.push_str(&format!(" ركز على: {tip}."));
            } else {
                text.push_str(" استمر في تحسين أدائك!");
            }
            text
        }
    }
}

/// Structured photo analysis returned by the external model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub shot_type: String,
    pub posture_analysis: String,
    pub balance_level: String,
    pub court_positioning: String,
    #[serde(default)]
    pub improvement_tips: Vec<String>,
}

impl ImageAnalysis {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json.trim()).map_err(EngineError::Payload)
    }

    /// Known shot, when the model's free-text label names one
    pub fn shot(&self) -> Option<ShotType> {
        self.shot_type.parse().ok()
    }

    /// Sentence spoken once a photo analysis completes
    pub fn announcement(&self, language: Language) -> String {
        let shot = self
            .shot()
            .map(|s| s.label(language).to_string())
            .unwrap_or_else(|| self.shot_type.clone());
        match language {
            Language::English => format!("Analysis complete. Detected shot: {shot}"),
            Language::Arabic => {
                format!("اكتمل التحليل من نظام نور. لقد تم التعرف على {shot}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(mistakes: &[&str], tips: &[&str]) -> PerformanceAnalysis {
        PerformanceAnalysis {
            shot_type: ShotType::Serve,
            posture_status: PostureStatus::NeedsAdjustment,
            accuracy_score: 64,
            stability_score: 88,
            mistakes: mistakes.iter().map(|m| m.to_string()).collect(),
            recommendations: tips.iter().map(|t| t.to_string()).collect(),
            elbow_angle: 140,
            back_angle: 12,
            knee_angle: 150,
        }
    }

    #[test]
    fn test_prompt_carries_metrics() {
        let prompt = summary_prompt(
            &analysis(&["Hitting elbow drops too early", "Not enough drive"], &["Reach up"]),
            Language::English,
        );
        assert!(prompt.contains("Shot type: Serve"));
        assert!(prompt.contains("Accuracy: 64%"));
        assert!(prompt.contains("Stability: 88%"));
        assert!(prompt.contains("Hitting elbow drops too early, Not enough drive"));
        assert!(prompt.contains("under 60 words"));
    }

    #[test]
    fn test_local_summary_uses_first_tip() {
        let text = local_summary(&analysis(&["m"], &["Reach up", "Push"]), Language::English);
        assert!(text.starts_with("Serve: accuracy 64%, stability 88%."));
        assert!(text.contains("needs adjustment"));
        assert!(text.ends_with("Focus on this: Reach up."));
    }

    #[test]
    fn test_local_summary_without_tips() {
        let text = local_summary(&analysis(&[], &[]), Language::Arabic);
        assert!(text.contains("إرسال محترف"));
        assert!(text.ends_with("استمر في تحسين أدائك!"));
    }

    #[test]
    fn test_image_prompt_names_every_field() {
        for language in [Language::English, Language::Arabic] {
            let prompt = image_analysis_prompt(language);
            for field in [
                "shotType",
                "postureAnalysis",
                "balanceLevel",
                "courtPositioning",
                "improvementTips",
            ] {
                assert!(prompt.contains(field), "{language:?} prompt lacks {field}");
            }
            assert!(prompt.contains("JSON"));
        }
    }

    #[test]
    fn test_chat_instruction_follows_language() {
        assert!(chat_system_instruction(Language::English).contains("English only"));
        assert!(chat_system_instruction(Language::English).contains("Noor"));
        assert!(chat_system_instruction(Language::Arabic).contains("نظام نور"));
        assert!(chat_system_instruction(Language::Arabic).contains("العربية"));
    }

    #[test]
    fn test_parse_image_analysis() {
        let json = r#"
            {
                "shotType": "backhand",
                "postureAnalysis": "Good shoulder turn",
                "balanceLevel": "Stable",
                "courtPositioning": "Baseline",
                "improvementTips": ["Step in", "Finish high"]
            }
        "#;
        let parsed = ImageAnalysis::from_json(json).unwrap();
        assert_eq!(parsed.shot(), Some(ShotType::Backhand));
        assert_eq!(parsed.improvement_tips.len(), 2);
        assert_eq!(
            parsed.announcement(Language::English),
            "Analysis complete. Detected shot: Backhand"
        );
    }

    #[test]
    fn test_unknown_shot_is_announced_verbatim() {
        let parsed = ImageAnalysis {
            shot_type: "Drop shot".into(),
            posture_analysis: String::new(),
            balance_level: String::new(),
            court_positioning: String::new(),
            improvement_tips: Vec::new(),
        };
        assert!(parsed.announcement(Language::English).ends_with("Drop shot"));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            ImageAnalysis::from_json("{\"shotType\": 1}"),
            Err(EngineError::Payload(_))
        ));
    }
}
