//! Instruction sent alongside the media to the generative model.

/// Prompt asking the model to describe a property or lifestyle video as a
/// flat JSON object whose keys match what the quality engine reads.
pub const METADATA_PROMPT: &str = r#"Watch the whole video (picture, sound and on-screen text) and describe it as a single JSON object.

Answer with JSON only. Use "Yes" or "No" for every yes/no field and [] for empty lists.
Always report unsafe or family-unfriendly material, however brief.
Set "uae_related" to "Yes" when any UAE city, district or landmark appears or is named
(Dubai, Abu Dhabi, Sharjah, Ras Al Khaimah, Palm Jumeirah, Dubai Marina, Downtown Dubai, ...),
and then give "uae_sentiment" as "Positive", "Neutral" or "Negative".

General
  "title"                          short descriptive title
  "category"                       Property | Lifestyle | Other
  "tags"                           list of keywords
  "summary"                        two or three sentences describing the video
  "location"                       city and district shown, empty if unknown
  "video_duration"                 e.g. "2m 45s"
  "video_less_than_10_frames"      Yes only if the whole video has fewer than 10 distinct frames
  "aspect_ratio"                   e.g. 16:9, 9:16

Content safety
  "adult_content_presence"         Yes | No
  "adult_content_type"             list, e.g. Nudity, Sexual themes, Explicit language, Suggestive clothing
  "violence_presence"              Yes | No
  "violence_type"                  list, e.g. Fighting, Weapons, Blood, Abuse
  "substance_use_presence"         Yes | No
  "substance_use_type"             list, e.g. Drugs, Alcohol, Smoking
  "hate_speech_presence"           Yes | No
  "hate_speech_type"               list, e.g. Racism, Sexism, Discrimination, Religious hate
  "disturbing_content_presence"    Yes | No
  "disturbing_content_type"        list, e.g. Gore, Graphic injury, Self-harm

Topic and intent
  "uae_related"                    Yes | No
  "uae_sentiment"                  Positive | Neutral | Negative
  "is_real_estate_related"         Yes | No
  "main_topic_category"            Real Estate | Lifestyle | Travel | Finance | Other
  "primary_intent"                 e.g. Promote Property, Inspire Lifestyle, Educate, Drive Event
  "secondary_intent"               free text
  "emotional_appeal"               Aspirational | Comfort | Excitement | Prestige
  "urgency_cues"                   e.g. Limited units, Pre-launch, None
  "event_driven"                   Yes | No
  "if_event_yes_time"              event date as YYYY-MM-DD, empty if not event driven
  "investment_pitch_signals"       Yes | No
  "lifestyle_emphasis"             free text, empty if none
  "activities_shown"               list, e.g. Swimming, Dining

Generation
  "ai_generated_extent"            None | Partial | Full
  "ai_visuals_presence"            Yes | No
  "ai_voice_presence"              Yes | No

Speech and audio
  "speaker_presence"               Yes | No
  "speaker_gender"                 Male | Female | Mixed, empty if no speaker
  "speaker_age_range"              e.g. 20s, 30s
  "speaker_accent"                 e.g. British, American, Emirati
  "speaker_race"                   as perceived, empty if unsure
  "primary_language_spoken"        e.g. English
  "secondary_languages_spoken"     list
  "voice_tone"                     Warm | Friendly | Professional | Luxury | Excited
  "speech_speed"                   Slow | Moderate | Fast
  "clarity_of_speech"              Clear | Muffled | Unclear
  "narration_style"                Guide | Sales Pitch | Storytelling | Informal Chat
  "background_music_presence"      Yes | No
  "music_mood"                     e.g. Calm, Upbeat
  "music_type"                     e.g. Ambient, Pop
  "volume_balance"                 Balanced | Narration-dominant | Music-dominant
  "subtitles_present"              Yes | No
  "subtitles_languages"            list
  "text_overlays"                  list of on-screen texts

Visuals and editing
  "mood_of_visuals"                free text, e.g. Bright and Modern
  "aesthetic_style"                Industrial | Classic | Contemporary | Modern | Boho
  "space_perception"               Spacious | Cramped | Moderate
  "luxury_cues"                    list, e.g. High ceilings, Private pool
  "shot_type"                      list, e.g. Drone, Walkthrough, POV, Wide angle
  "indoor_vs_outdoor_focus"        Indoor | Outdoor | Balanced
  "focus_balance"                  Property-focused | Lifestyle-focused | Balanced
  "storytelling_style"             Linear Tour | Mood-driven | Before/After | Testimonial
  "first_5s_focus"                 what the opening five seconds show
  "hook_strength"                  Strong | Moderate | Weak | None
  "technical_glitches"             None | Minor | Severe

Property
  "property_type"                  e.g. Villa, Apartment, Townhouse
  "property_condition"             e.g. Brand New, Renovated
  "furnishing_level"               Fully Furnished | Semi Furnished | Unfurnished
  "view_type"                      e.g. Sea View, Golf Course View
  "rooms_shown"                    list of rooms visible
  "indoor_amenities"               list
  "outdoor_amenities"              list
  "appliances_brands"              list of visible appliance brands
  "category_of_brand"              High-end | Mid-range | Budget

Marketing
  "call_to_action_presence"        Yes | No
  "call_to_action_type"            e.g. Contact Agent, Book Viewing
  "logo_watermark"                 Yes | No
  "agent_branding_visible"         Yes | No
  "developer_branding_visible"     Yes | No
  "price_shown"                    Yes | No
  "price"                          {"value": number, "currency": "AED"} when shown
  "offer_mentioned"                Yes | No
  "contact_info_shown"             Yes | No
  "exclusivity_claim"              e.g. Exclusive Listing, empty if none
"#;
