// Prompt used to turn raw resume text into a structured profile.

/// Instruction block sent ahead of the resume text. The key list and shapes
/// here define the JSON profile the frontend renders.
pub const RESUME_PROFILE_INSTRUCTIONS: &str = "\
You are given a candidate's resume text.
Return a SINGLE valid JSON object ONLY, with no preface, no markdown, no code fences.
MANDATORY keys: name, title, about, skills, projects, experience, education.
- name: string
- title: concise professional title
- about: 2-4 sentences summary
- skills: array of strings (deduplicate, normalized)
- projects: array of objects [{name, description, tech}]
- experience: array of objects [{company, role, start, end, summary, achievements[]}]
- education: array of objects [{institution, degree, start, end, details}]
If information is missing, infer conservatively or use empty strings/arrays, but STILL return a single valid JSON object.
";

/// Separates the instructions from the literal resume text.
pub const RESUME_TEXT_HEADER: &str = "\nRESUME TEXT BELOW:\n";

/// Builds the full prompt for a resume. Output depends only on `resume_text`,
/// which is appended verbatim and uncapped.
pub fn build_resume_prompt(resume_text: &str) -> String {
    let mut prompt = String::with_capacity(
        RESUME_PROFILE_INSTRUCTIONS.len() + RESUME_TEXT_HEADER.len() + resume_text.len(),
    );
    prompt.push_str(RESUME_PROFILE_INSTRUCTIONS);
    prompt.push_str(RESUME_TEXT_HEADER);
    prompt.push_str(resume_text);
    prompt
}
