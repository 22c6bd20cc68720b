// All LLM prompt templates for the assistant.
// Placeholders are `{name}`; fill them with `fill_template`. Any other brace
// (the JSON skeletons in the extraction prompts) is sent through untouched.

/// Intent classification. Replace `{query}`.
pub const CLASSIFY_PROMPT: &str = "Dựa vào yêu cầu của người dùng, hãy xác định chức năng cần thực hiện:

Yêu cầu: {query}

Trả về một trong các giá trị sau:
- find_jobs: Tìm kiếm việc làm
- write_email: Viết email ứng tuyển
- evaluate_cv: Đánh giá CV
- find_companies: Tìm công ty phù hợp
- create_cv: Tạo CV mới";

// ── Extraction prompts (replace `{query}`) ─────────────────────────────────

pub const FIND_JOBS_EXTRACTION: &str = r#"Từ yêu cầu của người dùng, hãy trích xuất các thông tin sau về công việc cần tìm:

Yêu cầu: {query}

Trả về kết quả theo định dạng JSON:
{
    "job_description": "Mô tả công việc",
    "salary": "Mức lương mong muốn (nếu có)",
    "location": "Địa điểm làm việc (nếu có)",
    "experience": "Số năm kinh nghiệm (nếu có, chỉ số)"
}"#;

pub const WRITE_EMAIL_EXTRACTION: &str = r#"Từ yêu cầu của người dùng, hãy trích xuất các thông tin sau về email ứng tuyển:

Yêu cầu: {query}

Trả về kết quả theo định dạng JSON:
{
    "job_title": "Vị trí công việc",
    "company": "Tên công ty",
    "skills": "Kỹ năng và kinh nghiệm của ứng viên"
}"#;

pub const EVALUATE_CV_EXTRACTION: &str = r#"Từ yêu cầu của người dùng, hãy trích xuất các thông tin sau về CV cần đánh giá:

Yêu cầu: {query}

Trả về kết quả theo định dạng JSON:
{
    "cv_text": "Nội dung CV (nếu có)",
    "job_description": "Mô tả công việc ứng tuyển (nếu có)"
}"#;

pub const FIND_COMPANIES_EXTRACTION: &str = r#"Từ yêu cầu của người dùng, hãy trích xuất các thông tin sau về công ty cần tìm:

Yêu cầu: {query}

Trả về kết quả theo định dạng JSON:
{
    "skills": "Kỹ năng và kinh nghiệm của ứng viên",
    "industry": "Ngành nghề quan tâm",
    "location": "Địa điểm làm việc (nếu có)"
}"#;

pub const CREATE_CV_EXTRACTION: &str = r#"Từ yêu cầu của người dùng, hãy trích xuất các thông tin sau để tạo CV:

Yêu cầu: {query}

Trả về kết quả theo định dạng JSON:
{
    "name": "Họ và tên",
    "email": "Email",
    "phone": "Số điện thoại (nếu có)",
    "education": "Học vấn (nếu có)",
    "experience": "Kinh nghiệm làm việc",
    "skills": "Kỹ năng"
}"#;

// ── Task prompts ───────────────────────────────────────────────────────────

/// Job search. Replace: {job_description}, {salary}, {location}, {experience}
///
/// The HTML house style (distinct heading/body colors, bullets, closing summary)
/// is requested here and nowhere else. The answer is returned as the model wrote it.
pub const FIND_JOBS_TASK: &str = "Bạn là một trợ lý tìm việc chuyên nghiệp. Hãy giúp tôi tìm kiếm công việc phù hợp dựa trên thông tin sau:
Mô tả công việc: {job_description}
Mức lương mong muốn: {salary}
Địa điểm: {location}
Kinh nghiệm: {experience} năm

Hãy liệt kê 5 công việc phù hợp nhất, bao gồm:
1. Tên vị trí
2. Công ty
3. Mức lương ước tính
4. Yêu cầu chính
5. Lý do phù hợp

Trả lời bằng tiếng Việt và định dạng rõ ràng.
Yêu cầu: trả về kết quả dưới dạng HTML (không được hiển thị các text kiểu thẻ trong html, nội dung phải chính xác chỉn chu từng câu chữ do kết quả trả về sẽ được tôi dùng để hiển thị trực tiếp lên cho người dùng đọc)
, gạch thành các ý, format giao diện dễ đọc, có kết luận cuối cùng, hightline vào các ý chính, màu sắc của tiêu đề và nội dung bên trong không được trùng nhau

Luôn trả về dạng HTML";

/// Application email. Replace: {job_title}, {company}, {skills}
pub const WRITE_EMAIL_TASK: &str = "Bạn là một chuyên gia viết email ứng tuyển. Hãy viết một email ứng tuyển chuyên nghiệp dựa trên thông tin sau:

Vị trí ứng tuyển: {job_title}
Công ty: {company}
Kỹ năng và kinh nghiệm của ứng viên: {skills}

Email cần có:
1. Lời chào và giới thiệu bản thân
2. Lý do quan tâm đến công ty và vị trí
3. Tóm tắt kỹ năng và kinh nghiệm phù hợp
4. Kết thúc lịch sự và mong muốn phỏng vấn

Trả lời bằng tiếng Việt và định dạng rõ ràng.";

/// CV review. Replace: {cv_text}, {job_context}
pub const EVALUATE_CV_TASK: &str = "Bạn là một chuyên gia tuyển dụng và đánh giá CV. Hãy đánh giá CV sau và đưa ra gợi ý cải thiện:

CV: {cv_text}

{job_context}

Hãy đánh giá các khía cạnh sau:
1. Định dạng và trì bày
2. Nội dung và cách diễn đạt
3. Kỹ năng và kinh nghiệm nổi bật
4. Điểm cần cải thiện
5. Gợi ý cụ thể để nâng cao chất lượng CV

Trả lời bằng tiếng Việt và định dạng rõ ràng.";

/// Prefix of the optional job-context line in `EVALUATE_CV_TASK`.
pub const JOB_CONTEXT_PREFIX: &str = "Mô tả công việc ứng tuyển: ";

/// CV creation. Replace: {name}, {email}, {phone}, {education}, {experience}, {skills}
pub const CREATE_CV_TASK: &str = "Bạn là một chuyên gia tạo CV. Hãy tạo một CV chuyên nghiệp dựa trên thông tin sau:

Họ và tên: {name}
Email: {email}
Số điện thoại: {phone}
Học vấn: {education}
Kinh nghiệm làm việc: {experience}
Kỹ năng: {skills}

Hãy tạo một CV với định dạng rõ ràng, chuyên nghiệp, bao gồm:
1. Thông tin cá nhân
2. Mục tiêu nghề nghiệp
3. Học vấn
4. Kinh nghiệm làm việc
5. Kỹ năng
6. Thành tích (nếu có thể suy luận từ thông tin cung cấp)

Trả lời bằng tiếng Việt và định dạng rõ ràng.";

/// Company discovery. Replace: {skills}, {industry}, {location}
pub const FIND_COMPANIES_TASK: &str = "Bạn là một chuyên gia phân tích thị trường việc làm. Hãy liệt kê và phân tích các công ty hàng đầu phù hợp với thông tin sau:

Kỹ năng và kinh nghiệm: {skills}
Ngành nghề: {industry}
Địa điểm: {location}

Hãy liệt kê 10 công ty phù hợp nhất, bao gồm:
1. Tên công ty
2. Lĩnh vực hoạt động chính
3. Quy mô công ty
4. Lý do phù hợp với kỹ năng của ứng viên
5. Cơ hội phát triển

Trả lời bằng tiếng Việt và định dạng rõ ràng.";

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Text coming from `lookup` is never re-scanned, so user input that happens to
/// contain `{location}` stays literal. Placeholders `lookup` does not know, and
/// braces around anything that is not an identifier, are copied unchanged.
pub fn fill_template<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            let is_ident =
                !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !is_ident {
                return None;
            }
            lookup(name).map(|value| (value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_query(name: &str) -> Option<&'static str> {
        (name == "query").then_some("Tìm việc Rust")
    }

    #[test]
    fn test_fill_replaces_known_placeholder() {
        let filled = fill_template("Yêu cầu: {query}.", only_query);
        assert_eq!(filled, "Yêu cầu: Tìm việc Rust.");
    }

    #[test]
    fn test_fill_keeps_json_skeleton_braces() {
        let filled = fill_template(FIND_JOBS_EXTRACTION, only_query);
        assert!(filled.contains("Yêu cầu: Tìm việc Rust"));
        assert!(filled.contains("{\n    \"job_description\""));
        assert!(filled.trim_end().ends_with('}'));
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        let filled = fill_template("{query} / {salary}", only_query);
        assert_eq!(filled, "Tìm việc Rust / {salary}");
    }

    #[test]
    fn test_fill_does_not_rescan_substituted_text() {
        let filled = fill_template("A={a} B={b}", |name| match name {
            "a" => Some("{b}"),
            "b" => Some("x"),
            _ => None,
        });
        assert_eq!(filled, "A={b} B=x");
    }

    #[test]
    fn test_fill_handles_unclosed_brace() {
        assert_eq!(fill_template("tail {query", only_query), "tail {query");
    }

    #[test]
    fn test_classify_prompt_lists_every_task_id() {
        for id in [
            "find_jobs",
            "write_email",
            "evaluate_cv",
            "find_companies",
            "create_cv",
        ] {
            assert!(CLASSIFY_PROMPT.contains(&format!("- {id}:")));
        }
    }

    #[test]
    fn test_find_jobs_task_demands_html() {
        assert!(FIND_JOBS_TASK.contains("HTML"));
        assert!(FIND_JOBS_TASK.ends_with("Luôn trả về dạng HTML"));
    }
}
