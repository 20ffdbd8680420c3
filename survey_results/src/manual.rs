/*!

This is the long-form manual for `survey_results` and `surveycmp`.

## Input format

A results document is a plain text file with one block per question. A block
starts with a header line and is followed by its data lines:

```text
问题1:【评分题】您对新手引导教程的满意度如何？
1: 52 (8.64%)
2: 11 (1.83%)
3: 108 (17.94%)
4: 124 (20.60%)
5: 307 (51.00%)

问题2:【多选题】对于新手教学，您认为不太满意的地方主要是？
选项1: 28 (12.07%)
选项2: 35 (15.09%)

问题3:【填空题】其他建议
37
```

### Headers

A header starts with `问题` or `Question`, then a number and a colon, then the
question type in `【】` brackets, then the question text. The question text is
the key of the question in the survey: if two blocks have the same text, the
last one is kept.

The following types are recognized:

| label    | type              |
|----------|-------------------|
| `单选题` | single choice     |
| `多选题` | multiple choice   |
| `评分题` | rating            |
| `填空题` | fill in the blank |

A header with any other label is ignored, along with its data lines.

### Data lines

For choice and rating questions, every data line is `<option>: <count>`,
optionally followed by an annotation such as the percentage. The space after
the colon is required. For rating questions the options should be integers;
options that are not integers are kept, but they do not contribute to the
average or the other rating statistics.

Fill in the blank questions have a single data line holding the number of
answers. The answers themselves are not part of the format.

Blank lines are ignored. Lines that cannot be read are skipped: a damaged
document still produces every question that could be understood.

## Matching questions between two surveys

Two questions are paired when they have the same type (fill in the blank
questions are never paired) and the Jaccard similarity of their texts is
strictly above a threshold (0.6 by default). Texts are split into words on
Unicode word boundaries; Chinese text is split into single characters.
Punctuation is not a token: `您的年龄？` and `您的年龄` are identical, and a
text made of punctuation only has no tokens, so its similarity with anything
is 0. A different tokenizer can be passed to
[find_matches_with](crate::matching::find_matches_with) through the
[Segmenter](crate::segment::Segmenter) trait.

The pairs are sorted with the most similar first.

## Comparing matched questions

For choice questions, every option of either question gets a row with its
count and share on both sides. For rating questions, the rows start with the
mean, median, standard deviation, minimum and maximum of the ratings, followed
by one row per rating value.

## Command line

```bash
surveycmp -i results.md
surveycmp -i 2023.md --compare 2024.md --group1-name 2023 --group2-name 2024 --csv diff.csv
surveycmp --config compare.json
```

The configuration file accepts the following fields. All of them are optional
and the command line flags take precedence.

```json
{
  "outputSettings": {
    "outputDirectory": "out",
    "group1Name": "2023",
    "group2Name": "2024",
    "generateCsv": true
  },
  "surveySources": [
    { "filePath": "2023.md", "groupName": "2023" },
    { "filePath": "2024.md", "groupName": "2024" }
  ],
  "matching": { "threshold": "0.6" }
}
```

*/
