//! Analyst agent producing the five-part topic report.

use crate::InternalAgent;

// Prompt adapted from https://x.com/dotey/status/2004757229128335725
const ANALYSIS_FRAMEWORK: &str = r#"
## 分析框架

### 一、核心内容（搞清楚"是什么"）
1. 文章的核心论点是什么？用一句话概括
2. 作者用了哪些关键概念？这些概念是怎么定义的？
3. 文章的结构是什么？论证是怎么展开的？
4. 有哪些具体案例或证据支撑观点？

### 二、背景语境（理解"为什么"）
1. 作者是谁？他的背景、身份、立场是什么？
2. 这篇文章是在什么背景下写的？在回应什么现象或争论？
3. 作者想解决什么问题？想影响谁？
4. 作者的底层假设是什么？有哪些没说出来的前提？

### 三、批判性审视
1. 有人会怎么反驳这个观点？主要的反对意见可能是什么？
2. 作者的论证有没有漏洞、跳跃或偏颇之处？
3. 这个观点在什么情况下成立？什么情况下不成立？边界在哪里？
4. 作者有没有刻意回避或淡化什么问题？

### 四、价值提取
1. 作者提出了什么可复用的思考框架或方法论？
2. 对于[目标读者角色1]，能从中学到什么？
3. 对于[目标读者角色2]，能从中学到什么？
4. 这篇文章可能改变读者的什么认知？

### 五、写作技巧分析（可选）
1. 文章的标题、开头、结尾是怎么设计的？
2. 作者用了什么技巧让文章有说服力？
3. 这篇文章的写法有什么值得学习的地方？
"#;

const INSTRUCTIONS: &str = "你是一位专业的内容分析师。\
先调用工具 get_topic_bundle 获取文章内容（主题）与评论，然后严格按以下框架逐一回答问题。\
回答要具体、有洞察，避免泛泛而谈。如果某个问题信息不足无法回答，请说明原因。\n\n";

pub struct AnalystAgent {
    system_prompt: String,
}

impl AnalystAgent {
    pub fn new() -> Self {
        Self {
            system_prompt: format!("{}{}", INSTRUCTIONS, ANALYSIS_FRAMEWORK),
        }
    }
}

impl Default for AnalystAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalAgent for AnalystAgent {
    fn name(&self) -> &str {
        "analyst"
    }

    fn description(&self) -> &str {
        "Analyzes a V2EX topic and its replies under a five-part rubric"
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn tool_names(&self) -> &[&str] {
        &["get_topic_bundle"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyst_agent() {
        let agent = AnalystAgent::new();
        assert_eq!(agent.name(), "analyst");
        assert_eq!(agent.tool_names(), &["get_topic_bundle"]);
        // The prompt must direct the model to the bundle tool before analysis.
        assert!(agent.system_prompt().contains("get_topic_bundle"));
        assert!(agent.system_prompt().contains("分析框架"));
    }
}
